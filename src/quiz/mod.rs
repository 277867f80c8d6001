//! Practice quizzes: generation, grading and session flow

pub mod generator;
pub mod grading;
pub mod session;

pub use generator::{generate_choices, generate_quiz, generate_quiz_from_store, spelling_hint};
pub use grading::{grade_answer, is_correct};
pub use session::{AnswerOutcome, AnsweredQuestion, QuizSession};
