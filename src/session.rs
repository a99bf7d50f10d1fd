use crate::error::SessionError;
use crate::models::{Question, QuestionOption};
use std::fmt;
use std::time::{Duration, Instant};

/// Seconds a player gets for each question.
pub const QUESTION_SECONDS: u64 = 10;
/// How long the correct option stays highlighted before moving on.
pub const REVEAL_WINDOW: Duration = Duration::from_secs(2);

/// Per-question countdown. Owned by [`Phase::Answering`], so it is dropped
/// together with the question it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    deadline: Instant,
    remaining: u64,
}

impl Countdown {
    fn start(now: Instant) -> Self {
        Self {
            deadline: now + Duration::from_secs(QUESTION_SECONDS),
            remaining: QUESTION_SECONDS,
        }
    }

    /// Whole seconds left, rounded up, as of the last [`Countdown::advance`].
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns true once the deadline has passed.
    fn advance(&mut self, now: Instant) -> bool {
        let left = self.deadline.saturating_duration_since(now);
        self.remaining = left.as_secs() + u64::from(left.subsec_nanos() > 0);
        self.remaining == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Answering {
        index: usize,
        countdown: Countdown,
    },
    /// Reveal window after an answer or a timeout. `selected` is `None`
    /// when the countdown ran out.
    Revealing {
        index: usize,
        selected: Option<u8>,
        until: Instant,
    },
    Completed,
}

/// What a call to [`QuizSession::tick`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    TimedOut { index: usize },
    Advanced { index: usize },
    Completed(Results),
}

/// How an option should be drawn in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Results {
    pub score: usize,
    pub total: usize,
}

impl Results {
    /// Share of correct answers in percent. Defined as 0 for an empty quiz.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} out of {} correct - ({:.2}%)",
            self.score,
            self.total,
            self.percentage()
        )
    }
}

/// One play-through of the question bank.
///
/// The questions are snapshotted on [`QuizSession::start`]; edits made in the
/// manage tab while a quiz runs apply to the next one.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    phase: Phase,
    score: usize,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            phase: Phase::Idle,
            score: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.phase,
            Phase::Answering { .. } | Phase::Revealing { .. }
        )
    }

    pub fn question_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Answering { index, .. } | Phase::Revealing { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question_index().and_then(|i| self.questions.get(i))
    }

    pub fn time_remaining(&self) -> u64 {
        match &self.phase {
            Phase::Answering { countdown, .. } => countdown.remaining(),
            _ => 0,
        }
    }

    pub fn selected_option(&self) -> Option<u8> {
        match self.phase {
            Phase::Revealing { selected, .. } => selected,
            _ => None,
        }
    }

    pub fn reveal_answer(&self) -> bool {
        matches!(self.phase, Phase::Revealing { .. })
    }

    pub fn results(&self) -> Option<Results> {
        match self.phase {
            Phase::Completed => Some(Results {
                score: self.score,
                total: self.total(),
            }),
            _ => None,
        }
    }

    /// Starts a fresh play-through from question 1.
    pub fn start(&mut self, bank: &[Question], now: Instant) -> Result<(), SessionError> {
        if self.is_running() {
            return Err(SessionError::AlreadyRunning);
        }
        if bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }
        for (index, question) in bank.iter().enumerate() {
            question
                .validate()
                .map_err(|source| SessionError::InvalidQuestion { index, source })?;
        }

        self.questions = bank.to_vec();
        self.score = 0;
        self.phase = Phase::Answering {
            index: 0,
            countdown: Countdown::start(now),
        };
        Ok(())
    }

    /// Records the player's pick for the current question. Only the first
    /// pick counts; returns false when the selection was ignored.
    pub fn select_option(&mut self, option_id: u8, now: Instant) -> bool {
        let Phase::Answering { index, .. } = self.phase else {
            return false;
        };
        let Some(option) = self.questions[index]
            .options
            .iter()
            .find(|option| option.id == option_id)
        else {
            return false;
        };

        if option.is_correct {
            self.score += 1;
        }
        self.phase = Phase::Revealing {
            index,
            selected: Some(option_id),
            until: now + REVEAL_WINDOW,
        };
        true
    }

    /// Drives both timers. Catches up on every deadline that passed before
    /// `now` and returns the transitions in the order they happened.
    pub fn tick(&mut self, now: Instant) -> Vec<Transition> {
        let mut transitions = Vec::new();
        loop {
            match &mut self.phase {
                Phase::Answering { index, countdown } => {
                    if !countdown.advance(now) {
                        break;
                    }
                    let index = *index;
                    let until = countdown.deadline + REVEAL_WINDOW;
                    self.phase = Phase::Revealing {
                        index,
                        selected: None,
                        until,
                    };
                    transitions.push(Transition::TimedOut { index });
                }
                Phase::Revealing { index, until, .. } => {
                    if now < *until {
                        break;
                    }
                    let next = *index + 1;
                    let ended_at = *until;
                    if next < self.questions.len() {
                        self.phase = Phase::Answering {
                            index: next,
                            countdown: Countdown::start(ended_at),
                        };
                        transitions.push(Transition::Advanced { index: next });
                    } else {
                        self.phase = Phase::Completed;
                        transitions.push(Transition::Completed(Results {
                            score: self.score,
                            total: self.total(),
                        }));
                    }
                }
                Phase::Idle | Phase::Completed => break,
            }
        }
        transitions
    }

    /// Leaves the results screen. The bank is not re-fetched.
    pub fn restart(&mut self) {
        if self.phase == Phase::Completed {
            self.reset();
        }
    }

    /// Drops a running quiz without showing results.
    pub fn abandon(&mut self) {
        if self.is_running() {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.questions.clear();
        self.score = 0;
        self.phase = Phase::Idle;
    }

    pub fn mark_for(&self, option: &QuestionOption) -> OptionMark {
        let Phase::Revealing { selected, .. } = self.phase else {
            return OptionMark::Plain;
        };
        if option.is_correct {
            OptionMark::Correct
        } else if selected == Some(option.id) {
            OptionMark::Incorrect
        } else {
            OptionMark::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_question, QuestionId};

    fn two_plus_two() -> Question {
        Question {
            id: QuestionId::Number(1),
            text: "2+2?".to_string(),
            options: [("3", false), ("4", true), ("5", false), ("6", false)]
                .iter()
                .enumerate()
                .map(|(i, (text, is_correct))| QuestionOption {
                    id: i as u8,
                    text: text.to_string(),
                    is_correct: *is_correct,
                })
                .collect(),
        }
    }

    fn bank(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| sample_question(i as i64, &format!("Q{}", i), 0))
            .collect()
    }

    #[test]
    fn test_correct_click_completes_single_question_quiz() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&[two_plus_two()], t0).unwrap();
        assert_eq!(session.question_index(), Some(0));
        assert_eq!(session.time_remaining(), 10);

        assert!(session.select_option(1, t0 + Duration::from_secs(3)));
        assert!(session.reveal_answer());
        assert_eq!(session.score(), 1);

        let transitions = session.tick(t0 + Duration::from_secs(5));
        let results = session.results().unwrap();
        assert_eq!(transitions, vec![Transition::Completed(results)]);
        assert_eq!(results.to_string(), "1 out of 1 correct - (100.00%)");
        assert!(!session.is_running());
    }

    #[test]
    fn test_timeout_reveals_without_scoring() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&[two_plus_two()], t0).unwrap();

        session.tick(t0 + Duration::from_millis(9_500));
        assert_eq!(session.time_remaining(), 1);

        let transitions = session.tick(t0 + Duration::from_secs(10));
        assert_eq!(transitions, vec![Transition::TimedOut { index: 0 }]);
        assert!(session.reveal_answer());
        assert_eq!(session.selected_option(), None);
        assert_eq!(session.score(), 0);

        let question = session.current_question().unwrap().clone();
        assert_eq!(session.mark_for(&question.options[1]), OptionMark::Correct);
        assert_eq!(session.mark_for(&question.options[0]), OptionMark::Plain);

        session.tick(t0 + Duration::from_secs(12));
        assert_eq!(session.results().unwrap().to_string(), "0 out of 1 correct - (0.00%)");
    }

    #[test]
    fn test_countdown_decrements_each_second() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(1), t0).unwrap();
        session.tick(t0 + Duration::from_millis(500));
        assert_eq!(session.time_remaining(), 10);
        session.tick(t0 + Duration::from_secs(1));
        assert_eq!(session.time_remaining(), 9);
        session.tick(t0 + Duration::from_millis(7_200));
        assert_eq!(session.time_remaining(), 3);
    }

    #[test]
    fn test_second_selection_is_ignored() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&[two_plus_two()], t0).unwrap();

        assert!(session.select_option(0, t0));
        assert!(!session.select_option(1, t0));
        assert_eq!(session.selected_option(), Some(0));
        assert_eq!(session.score(), 0);

        let question = session.current_question().unwrap().clone();
        assert_eq!(session.mark_for(&question.options[0]), OptionMark::Incorrect);
        assert_eq!(session.mark_for(&question.options[1]), OptionMark::Correct);
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(1), t0).unwrap();
        assert!(!session.select_option(9, t0));
        assert!(!session.reveal_answer());
    }

    #[test]
    fn test_start_rejects_empty_bank() {
        let mut session = QuizSession::new();
        assert_eq!(
            session.start(&[], Instant::now()),
            Err(SessionError::EmptyBank)
        );
        assert_eq!(session.phase(), &Phase::Idle);
    }

    #[test]
    fn test_start_rejects_invalid_question() {
        let mut broken = sample_question(2, "Q", 0);
        broken.options[1].is_correct = true;
        let mut session = QuizSession::new();
        let err = session
            .start(&[sample_question(1, "ok", 0), broken], Instant::now())
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidQuestion { index: 1, .. }));
    }

    #[test]
    fn test_start_while_running_is_rejected() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(2), t0).unwrap();
        assert_eq!(session.start(&bank(2), t0), Err(SessionError::AlreadyRunning));
    }

    #[test]
    fn test_start_after_completion_resets_score_and_index() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(1), t0).unwrap();
        session.select_option(0, t0);
        session.tick(t0 + REVEAL_WINDOW);
        assert_eq!(session.results().unwrap().score, 1);

        let t1 = t0 + Duration::from_secs(30);
        session.start(&bank(3), t1).unwrap();
        assert_eq!(session.question_index(), Some(0));
        assert_eq!(session.score(), 0);
        assert_eq!(session.total(), 3);
    }

    #[test]
    fn test_completes_exactly_once_after_all_questions() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(3), t0).unwrap();

        let mut now = t0;
        let mut completions = 0;
        for expected_index in 0..3 {
            assert_eq!(session.question_index(), Some(expected_index));
            session.select_option(0, now);
            assert!(session.score() <= session.total());
            now += REVEAL_WINDOW;
            for transition in session.tick(now) {
                if matches!(transition, Transition::Completed(_)) {
                    completions += 1;
                }
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(session.results(), Some(Results { score: 3, total: 3 }));

        assert!(session.tick(now + Duration::from_secs(60)).is_empty());
        assert!(!session.select_option(0, now));
        assert_eq!(session.phase(), &Phase::Completed);
    }

    #[test]
    fn test_late_tick_catches_up_on_missed_deadlines() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(2), t0).unwrap();

        // 10s for Q1, 2s reveal, 10s for Q2, 2s reveal.
        let transitions = session.tick(t0 + Duration::from_secs(24));
        assert_eq!(
            transitions,
            vec![
                Transition::TimedOut { index: 0 },
                Transition::Advanced { index: 1 },
                Transition::TimedOut { index: 1 },
                Transition::Completed(Results { score: 0, total: 2 }),
            ]
        );
    }

    #[test]
    fn test_new_question_gets_fresh_countdown() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(2), t0).unwrap();
        session.tick(t0 + Duration::from_secs(8));
        session.select_option(0, t0 + Duration::from_secs(8));
        session.tick(t0 + Duration::from_secs(10));
        assert_eq!(session.question_index(), Some(1));
        assert_eq!(session.time_remaining(), 10);

        // The first question's deadline has passed but its timer is gone.
        session.tick(t0 + Duration::from_secs(11));
        assert!(!session.reveal_answer());
        assert_eq!(session.time_remaining(), 9);
    }

    #[test]
    fn test_restart_only_leaves_results() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(1), t0).unwrap();
        session.restart();
        assert!(session.is_running());

        session.select_option(0, t0);
        session.tick(t0 + REVEAL_WINDOW);
        session.restart();
        assert_eq!(session.phase(), &Phase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.total(), 0);
    }

    #[test]
    fn test_abandon_drops_running_quiz() {
        let t0 = Instant::now();
        let mut session = QuizSession::new();
        session.start(&bank(2), t0).unwrap();
        session.select_option(0, t0);
        session.abandon();
        assert_eq!(session.phase(), &Phase::Idle);
        assert!(session.tick(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_percentage_is_defined_for_empty_quiz() {
        let results = Results { score: 0, total: 0 };
        assert_eq!(results.percentage(), 0.0);
        assert_eq!(results.to_string(), "0 out of 0 correct - (0.00%)");
    }

    #[test]
    fn test_partial_score_formats_two_decimals() {
        let results = Results { score: 1, total: 3 };
        assert_eq!(results.to_string(), "1 out of 3 correct - (33.33%)");
    }
}
