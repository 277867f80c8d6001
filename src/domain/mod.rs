pub mod progress;
pub mod quiz;
pub mod word;

pub use progress::{
  Article, DailyActivity, FavoriteWord, PracticeHistoryEntry, ProgressRecord, Stats, StreakState, WrongAnswerEntry,
};
pub use quiz::{Question, QuestionKind};
pub use word::{ExamplePair, Level, WordEntry};
