//! Sentence playback over a text-to-speech collaborator.
//!
//! States: `Idle` and `Playing { index, mode }`. The host reports the end
//! of each utterance through `on_utterance_end`; in play-all mode that
//! advances to the next sentence. `stop` returns to `Idle` from anywhere.
//! Every utterance carries an id so that end reports for utterances that
//! were cut off are ignored.

use serde::Serialize;

use crate::config;

/// Identifies one `speak` request
pub type UtteranceId = u64;

/// Text-to-speech backend supplied by the host
pub trait SpeechOutput {
  /// Start speaking. Implicitly cancels any utterance in progress.
  fn speak(&mut self, id: UtteranceId, text: &str, rate: f32);

  fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
  /// One sentence, then back to idle
  Single,
  /// Every sentence from `index` to the end
  All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackState {
  Idle,
  Playing { index: usize, mode: PlaybackMode },
}

pub struct Playback<O> {
  output: O,
  sentences: Vec<String>,
  state: PlaybackState,
  rate: f32,
  current_utterance: Option<UtteranceId>,
  next_id: UtteranceId,
}

impl<O: SpeechOutput> Playback<O> {
  pub fn new(output: O, sentences: Vec<String>) -> Self {
    Self {
      output,
      sentences,
      state: PlaybackState::Idle,
      rate: 1.0,
      current_utterance: None,
      next_id: 0,
    }
  }

  pub fn state(&self) -> PlaybackState {
    self.state
  }

  pub fn output(&self) -> &O {
    &self.output
  }

  pub fn sentences(&self) -> &[String] {
    &self.sentences
  }

  /// Sentence to highlight, if any
  pub fn active_sentence(&self) -> Option<usize> {
    match self.state {
      PlaybackState::Playing { index, .. } => Some(index),
      PlaybackState::Idle => None,
    }
  }

  pub fn is_playing_all(&self) -> bool {
    matches!(self.state, PlaybackState::Playing { mode: PlaybackMode::All, .. })
  }

  pub fn rate(&self) -> f32 {
    self.rate
  }

  /// Change the rate for the next utterance. Only the offered rates are
  /// accepted.
  pub fn set_rate(&mut self, rate: f32) -> bool {
    if !config::SPEECH_RATES.contains(&rate) {
      return false;
    }
    self.rate = rate;
    true
  }

  pub fn play_sentence(&mut self, index: usize) -> bool {
    if index >= self.sentences.len() {
      return false;
    }
    self.start(index, PlaybackMode::Single);
    true
  }

  /// Start reading from the first sentence, or stop if already doing so
  pub fn toggle_play_all(&mut self) {
    if self.is_playing_all() {
      self.stop();
    } else if !self.sentences.is_empty() {
      self.start(0, PlaybackMode::All);
    }
  }

  /// Pronounce a tapped word. Interrupts sentence playback.
  pub fn speak_word(&mut self, word: &str) {
    let id = self.issue_id();
    self.output.speak(id, word, config::WORD_SPEECH_RATE);
    self.current_utterance = None;
    self.state = PlaybackState::Idle;
  }

  /// Completion report from the backend
  pub fn on_utterance_end(&mut self, id: UtteranceId) {
    if self.current_utterance != Some(id) {
      tracing::debug!("Ignoring end of stale utterance {}", id);
      return;
    }
    self.current_utterance = None;

    match self.state {
      PlaybackState::Playing {
        index,
        mode: PlaybackMode::All,
      } if index + 1 < self.sentences.len() => self.start(index + 1, PlaybackMode::All),
      _ => self.state = PlaybackState::Idle,
    }
  }

  pub fn stop(&mut self) {
    if self.state != PlaybackState::Idle || self.current_utterance.is_some() {
      self.output.cancel();
    }
    self.current_utterance = None;
    self.state = PlaybackState::Idle;
  }

  fn start(&mut self, index: usize, mode: PlaybackMode) {
    let id = self.issue_id();
    self.output.speak(id, &self.sentences[index], self.rate);
    self.current_utterance = Some(id);
    self.state = PlaybackState::Playing { index, mode };
  }

  fn issue_id(&mut self) -> UtteranceId {
    self.next_id += 1;
    self.next_id
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Recorder {
    spoken: Vec<(UtteranceId, String, f32)>,
    cancels: usize,
  }

  impl SpeechOutput for Recorder {
    fn speak(&mut self, id: UtteranceId, text: &str, rate: f32) {
      self.spoken.push((id, text.to_string(), rate));
    }

    fn cancel(&mut self) {
      self.cancels += 1;
    }
  }

  impl Recorder {
    fn last_id(&self) -> UtteranceId {
      self.spoken.last().map(|(id, _, _)| *id).unwrap()
    }
  }

  fn playback() -> Playback<Recorder> {
    let sentences = vec!["One.".to_string(), "Two.".to_string(), "Three.".to_string()];
    Playback::new(Recorder::default(), sentences)
  }

  #[test]
  fn test_play_all_walks_every_sentence() {
    let mut p = playback();
    p.toggle_play_all();
    assert_eq!(p.state(), PlaybackState::Playing { index: 0, mode: PlaybackMode::All });

    for expected in [1, 2] {
      let id = p.output().last_id();
      p.on_utterance_end(id);
      assert_eq!(p.active_sentence(), Some(expected));
    }

    let id = p.output().last_id();
    p.on_utterance_end(id);
    assert_eq!(p.state(), PlaybackState::Idle);

    let texts: Vec<&str> = p.output().spoken.iter().map(|(_, t, _)| t.as_str()).collect();
    assert_eq!(texts, vec!["One.", "Two.", "Three."]);
  }

  #[test]
  fn test_toggle_stops_play_all() {
    let mut p = playback();
    p.toggle_play_all();
    p.toggle_play_all();
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.output().cancels, 1);
  }

  #[test]
  fn test_single_sentence_returns_to_idle() {
    let mut p = playback();
    assert!(p.play_sentence(1));
    assert_eq!(p.state(), PlaybackState::Playing { index: 1, mode: PlaybackMode::Single });

    let id = p.output().last_id();
    p.on_utterance_end(id);
    assert_eq!(p.state(), PlaybackState::Idle);
    assert!(!p.play_sentence(3));
  }

  #[test]
  fn test_stale_end_is_ignored() {
    let mut p = playback();
    p.toggle_play_all();
    let stale = p.output().last_id();

    // Jumping to a sentence cuts off play-all
    p.play_sentence(2);
    p.on_utterance_end(stale);
    assert_eq!(p.state(), PlaybackState::Playing { index: 2, mode: PlaybackMode::Single });
  }

  #[test]
  fn test_word_interrupts_playback() {
    let mut p = playback();
    p.toggle_play_all();
    p.speak_word("abandon");
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.output().spoken.last().map(|(_, _, r)| *r), Some(config::WORD_SPEECH_RATE));
  }

  #[test]
  fn test_rate_limited_to_offered_values() {
    let mut p = playback();
    assert!(p.set_rate(0.75));
    assert!(!p.set_rate(2.0));
    assert_eq!(p.rate(), 0.75);

    p.play_sentence(0);
    assert_eq!(p.output().spoken[0].2, 0.75);
  }

  #[test]
  fn test_empty_article_never_plays() {
    let mut p = Playback::new(Recorder::default(), vec![]);
    p.toggle_play_all();
    assert_eq!(p.state(), PlaybackState::Idle);
    assert!(p.output().spoken.is_empty());
  }
}
