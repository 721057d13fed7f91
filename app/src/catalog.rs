use ruocden_core::{DefinitionError, PuzzleDefinition, Question};
use thiserror::Error;

/// Fixed question count per puzzle, one per piece of the 3×3 board.
pub const QUESTIONS_PER_PUZZLE: usize = 9;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("could not parse puzzle list")]
    Parse(#[from] serde_json::Error),
    #[error("puzzle {id:?} is invalid")]
    Definition {
        id: String,
        #[source]
        source: DefinitionError,
    },
    #[error("no puzzle with id {0:?}")]
    UnknownId(String),
    #[error("the last remaining puzzle cannot be removed")]
    LastPuzzle,
}

/// Ordered list of puzzle definitions: curated on the editing surface,
/// consumed one at a time by sessions looking a puzzle up by id.
#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleCatalog {
    puzzles: Vec<PuzzleDefinition>,
}

impl PuzzleCatalog {
    /// Every definition is validated before the catalog accepts it.
    pub fn new(puzzles: Vec<PuzzleDefinition>) -> Result<Self, CatalogError> {
        for puzzle in &puzzles {
            validate(puzzle)?;
        }
        Ok(Self { puzzles })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.puzzles)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PuzzleDefinition> {
        self.puzzles.iter().find(|puzzle| puzzle.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.puzzles.iter().position(|puzzle| puzzle.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PuzzleDefinition> {
        self.puzzles.iter()
    }

    /// Replaces the definition with the same id, or appends a new one.
    pub fn upsert(&mut self, puzzle: PuzzleDefinition) -> Result<(), CatalogError> {
        validate(&puzzle)?;
        match self.puzzles.iter_mut().find(|slot| slot.id == puzzle.id) {
            Some(slot) => *slot = puzzle,
            None => self.puzzles.push(puzzle),
        }
        Ok(())
    }

    /// Removes a puzzle. At least one must always remain playable.
    pub fn remove(&mut self, id: &str) -> Result<PuzzleDefinition, CatalogError> {
        let index = self
            .position(id)
            .ok_or_else(|| CatalogError::UnknownId(id.to_string()))?;
        if self.puzzles.len() <= 1 {
            return Err(CatalogError::LastPuzzle);
        }
        Ok(self.puzzles.remove(index))
    }
}

fn validate(puzzle: &PuzzleDefinition) -> Result<(), CatalogError> {
    puzzle.validate().map_err(|source| CatalogError::Definition {
        id: puzzle.id.clone(),
        source,
    })
}

impl Default for PuzzleCatalog {
    /// The bundled Mid-Autumn puzzle shipped with the game.
    fn default() -> Self {
        Self {
            puzzles: vec![lantern_puzzle()],
        }
    }
}

fn seed_question(id: u32, prompt: &str, answers: &[&str]) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        accepted_answers: answers.iter().map(|answer| (*answer).to_string()).collect(),
        hint: None,
    }
}

fn lantern_puzzle() -> PuzzleDefinition {
    PuzzleDefinition {
        id: "default-puzzle-1".to_string(),
        image_ref: "https://cdn2.fptshop.com.vn/unsafe/1920x0/filters:format(webp):quality(75)/trung_thu_nam_2025_vao_ngay_nao_1_f8074057fa.jpg".to_string(),
        theme_hint: "Đây là một vật dụng quen thuộc trong Tết Trung Thu.".to_string(),
        target_name: "Đèn lồng Trung Thu".to_string(),
        target_meaning: "Những chiếc đèn lồng tượng trưng cho sự ấm áp, sum vầy và ánh sáng dẫn đường cho những điều may mắn, tốt đẹp trong cuộc sống.".to_string(),
        questions: vec![
            seed_question(0, "Tết Trung Thu còn có tên gọi khác là gì?", &["TẾT TRÔNG TRĂNG", "TET TRONG TRANG"]),
            seed_question(1, "Loại bánh đặc trưng không thể thiếu trong dịp Tết Trung Thu là gì?", &["BÁNH TRUNG THU", "BANH TRUNG THU"]),
            seed_question(2, "Con vật nào được gắn liền với sự tích chú Cuội trên cung trăng?", &["THỎ NGỌC", "THO NGOC"]),
            seed_question(3, "Hoạt động nào thường được trẻ em yêu thích nhất vào đêm Trung Thu?", &["RƯỚC ĐÈN", "RUOC DEN"]),
            seed_question(4, "Tết Trung Thu diễn ra vào ngày rằm tháng mấy Âm lịch?", &["THÁNG TÁM", "THANG TAM", "8"]),
            seed_question(5, "Điệu múa dân gian nào thường được biểu diễn trong dịp Tết Trung Thu?", &["MÚA LÂN", "MUA LAN"]),
            seed_question(6, "Theo truyền thuyết, ai là người đã uống thuốc trường sinh và bay lên cung trăng?", &["HẰNG NGA", "HANG NGA"]),
            seed_question(7, "Ngoài bánh nướng, loại bánh Trung Thu còn lại có vỏ ngoài màu trắng, dẻo là gì?", &["BÁNH DẺO", "BANH DEO"]),
            seed_question(8, "Tết Trung Thu chủ yếu là dịp lễ dành cho đối tượng nào?", &["THIẾU NHI", "THIEU NHI", "TRẺ EM", "TRE EM"]),
        ],
    }
}
