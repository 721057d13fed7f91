use chrono::Utc;
use ruocden_core::{
    AnswerOutcome, CompletionRecord, GuessOutcome, ProgressStore, PuzzleDefinition, PuzzleSession,
};
use std::time::Duration;

/// Per-question countdown enforced by the hosting UI; expiry is delivered
/// back as [`Intent::TimeExpired`].
pub const QUESTION_TIME_LIMIT: Duration = Duration::from_secs(15 * 60);

/// Discrete user and timer events driving one puzzle session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    OpenPiece(usize),
    SubmitAnswer(String),
    /// The countdown ran out; resolved as an empty (always incorrect)
    /// submission.
    TimeExpired,
    NextUnsolved,
    FinalGuess(String),
    Reset,
}

/// Transient message for the hosting UI to flash at the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Thin glue between user intents and the session. Every intent maps 1:1 to
/// a session call and outcomes come back as notification values, leaving
/// presentation to the host. The only state owned here is view-ephemeral:
/// the highlight on the most recently revealed piece.
pub struct SessionDriver<S> {
    session: PuzzleSession<S>,
    flash: Option<usize>,
}

impl<S: ProgressStore> SessionDriver<S> {
    pub fn new(puzzle: PuzzleDefinition, store: S) -> Self {
        Self {
            session: PuzzleSession::new(puzzle, store),
            flash: None,
        }
    }

    pub fn session(&self) -> &PuzzleSession<S> {
        &self.session
    }

    /// Piece to highlight for the reveal animation; cleared once taken.
    pub fn take_flash(&mut self) -> Option<usize> {
        self.flash.take()
    }

    /// Completion history, newest first.
    pub fn history(&self) -> Vec<CompletionRecord> {
        let mut completions = self.session.store().completions();
        completions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        completions
    }

    pub fn handle(&mut self, intent: Intent) -> Vec<Notification> {
        match intent {
            Intent::OpenPiece(index) => {
                self.session.open_question(index);
                Vec::new()
            }
            Intent::SubmitAnswer(answer) => self.submit(&answer),
            Intent::TimeExpired => self.submit(""),
            Intent::NextUnsolved => match self.session.next_unsolved() {
                Some(index) => {
                    self.session.open_question(index);
                    Vec::new()
                }
                None => vec![Notification::new(
                    "Hoàn Thành!",
                    "Bạn đã trả lời tất cả câu hỏi! Giờ là lúc cho lần đoán cuối cùng.",
                )],
            },
            Intent::FinalGuess(name) => self.final_guess(&name),
            Intent::Reset => {
                self.session.reset();
                self.flash = None;
                Vec::new()
            }
        }
    }

    fn submit(&mut self, answer: &str) -> Vec<Notification> {
        let asked = self.session.state().asking();
        match self.session.submit_answer(answer) {
            AnswerOutcome::NoChange => Vec::new(),
            AnswerOutcome::Incorrect => vec![Notification::new(
                "Không Chính Xác!",
                "Đó không phải là câu trả lời đúng. Hãy thử câu hỏi khác hoặc thử lại câu này sau.",
            )],
            AnswerOutcome::Revealed => {
                self.flash = asked;
                vec![Notification::new(
                    "Chính Xác!",
                    "Bạn đã mở được một mảnh ghép. Tiếp tục nào!",
                )]
            }
            AnswerOutcome::AllRevealed => {
                self.flash = asked;
                vec![
                    Notification::new("Chính Xác!", "Bạn đã mở được một mảnh ghép. Tiếp tục nào!"),
                    Notification::new(
                        "Đã Mở Tất Cả Mảnh Ghép!",
                        "Bây giờ, hãy đoán tên và ý nghĩa của bức hình!",
                    ),
                ]
            }
        }
    }

    fn final_guess(&mut self, name: &str) -> Vec<Notification> {
        match self.session.final_guess(name, Utc::now()) {
            GuessOutcome::NoChange => Vec::new(),
            GuessOutcome::Incorrect => vec![Notification::new(
                "Chưa Đúng Lắm!",
                "Tên của bức hình không chính xác. Hãy nhìn kỹ và thử lại!",
            )],
            GuessOutcome::Won => {
                let puzzle = self.session.puzzle();
                vec![Notification::new(
                    "Chúc Mừng, Bạn Đã Thắng!",
                    format!(
                        "Đáp án chính xác là: {}. Ý nghĩa: {}",
                        puzzle.target_name, puzzle.target_meaning
                    ),
                )]
            }
        }
    }
}
