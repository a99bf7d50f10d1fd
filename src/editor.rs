use crate::error::QuestionError;
use crate::models::{
    DraftToken, NewQuestion, Question, QuestionId, QuestionOption, StoreRequest, OPTION_COUNT,
};

/// Where a draft came from, which decides between create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOrigin {
    New,
    Existing(QuestionId),
}

/// Which input of the form has focus. `Text` is the question itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Text,
    Option(usize),
}

impl DraftField {
    fn next(self) -> Self {
        match self {
            DraftField::Text => DraftField::Option(0),
            DraftField::Option(i) if i + 1 < OPTION_COUNT => DraftField::Option(i + 1),
            DraftField::Option(_) => DraftField::Text,
        }
    }

    fn prev(self) -> Self {
        match self {
            DraftField::Text => DraftField::Option(OPTION_COUNT - 1),
            DraftField::Option(0) => DraftField::Text,
            DraftField::Option(i) => DraftField::Option(i - 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub origin: DraftOrigin,
    pub text: String,
    pub options: Vec<QuestionOption>,
    pub focus: DraftField,
    /// Set while a store call for this draft is in flight.
    pub submitted: bool,
    token: DraftToken,
}

impl Draft {
    fn blank(token: DraftToken) -> Self {
        Self {
            origin: DraftOrigin::New,
            text: String::new(),
            options: (0..OPTION_COUNT as u8).map(QuestionOption::blank).collect(),
            focus: DraftField::Text,
            submitted: false,
            token,
        }
    }

    pub fn token(&self) -> DraftToken {
        self.token
    }

    fn focused_text(&mut self) -> &mut String {
        match self.focus {
            DraftField::Text => &mut self.text,
            DraftField::Option(i) => &mut self.options[i].text,
        }
    }
}

/// The question form of the manage tab.
#[derive(Debug, Default)]
pub struct QuestionEditor {
    draft: Option<Draft>,
    last_token: DraftToken,
}

impl QuestionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// True while the current draft waits for the store.
    pub fn is_submitting(&self) -> bool {
        self.draft.as_ref().is_some_and(|d| d.submitted)
    }

    fn next_token(&mut self) -> DraftToken {
        self.last_token += 1;
        self.last_token
    }

    pub fn begin_new(&mut self) {
        let token = self.next_token();
        self.draft = Some(Draft::blank(token));
    }

    /// Loads a stored question into the form. Questions with a short option
    /// list are padded with blank options; extra options are dropped.
    pub fn begin_edit(&mut self, question: &Question) {
        let mut options: Vec<QuestionOption> = question
            .options
            .iter()
            .take(OPTION_COUNT)
            .cloned()
            .collect();
        for (i, option) in options.iter_mut().enumerate() {
            option.id = i as u8;
        }
        while options.len() < OPTION_COUNT {
            options.push(QuestionOption::blank(options.len() as u8));
        }

        let token = self.next_token();
        self.draft = Some(Draft {
            origin: DraftOrigin::Existing(question.id.clone()),
            text: question.text.clone(),
            options,
            focus: DraftField::Text,
            submitted: false,
            token,
        });
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.text = text.into();
        }
    }

    pub fn set_option_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(option) = self
            .draft
            .as_mut()
            .and_then(|draft| draft.options.get_mut(index))
        {
            option.text = text.into();
        }
    }

    /// Makes `index` the only correct option.
    pub fn mark_correct(&mut self, index: usize) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if index >= draft.options.len() {
            return;
        }
        for (i, option) in draft.options.iter_mut().enumerate() {
            option.is_correct = i == index;
        }
    }

    /// Marks the option under focus as correct. No-op on the question text.
    pub fn mark_focused_correct(&mut self) {
        if let Some(DraftField::Option(i)) = self.draft.as_ref().map(|d| d.focus) {
            self.mark_correct(i);
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.focus = draft.focus.next();
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.focus = draft.focus.prev();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(draft) = self.draft.as_mut() {
            draft.focused_text().push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.focused_text().pop();
        }
    }

    /// Validates the draft and builds the store call for it. The draft stays
    /// in place until the store confirms, so a failed call loses nothing.
    /// Returns `None` without a draft or while one submission is in flight.
    pub fn submit(&mut self) -> Option<Result<StoreRequest, QuestionError>> {
        let draft = self.draft.as_mut().filter(|d| !d.submitted)?;
        let question = match NewQuestion::new(draft.text.trim().to_string(), draft.options.clone()) {
            Ok(question) => question,
            Err(err) => return Some(Err(err)),
        };
        draft.submitted = true;
        Some(Ok(match &draft.origin {
            DraftOrigin::New => StoreRequest::Create {
                draft: draft.token,
                question,
            },
            DraftOrigin::Existing(id) => StoreRequest::Update {
                id: id.clone(),
                draft: draft.token,
                question,
            },
        }))
    }

    /// Drops the draft without touching the store.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Called once the store has accepted the submission made with `token`.
    /// A draft opened after that submission is left alone.
    pub fn finish(&mut self, token: DraftToken) {
        if self.draft.as_ref().is_some_and(|d| d.token == token) {
            self.draft = None;
        }
    }

    /// Called when the store rejected `token`, so the draft can be saved again.
    pub fn release(&mut self, token: DraftToken) {
        if let Some(draft) = self.draft.as_mut().filter(|d| d.token == token) {
            draft.submitted = false;
        }
    }

    /// Forgets a draft that edits a question which no longer exists.
    pub fn forget(&mut self, id: &QuestionId) {
        let origin = DraftOrigin::Existing(id.clone());
        if self.draft.as_ref().is_some_and(|d| d.origin == origin) {
            self.draft = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_question;

    fn correct_count(editor: &QuestionEditor) -> usize {
        editor
            .draft()
            .unwrap()
            .options
            .iter()
            .filter(|o| o.is_correct)
            .count()
    }

    #[test]
    fn test_begin_new_has_four_blank_options() {
        let mut editor = QuestionEditor::new();
        assert!(!editor.is_editing());
        editor.begin_new();
        let draft = editor.draft().unwrap();
        assert_eq!(draft.origin, DraftOrigin::New);
        assert_eq!(draft.options.len(), 4);
        assert!(draft.options.iter().all(|o| o.text.is_empty() && !o.is_correct));
        assert_eq!(
            draft.options.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_mark_correct_leaves_exactly_one() {
        let mut editor = QuestionEditor::new();
        let mut question = sample_question(4, "Q", 0);
        for option in &mut question.options {
            option.is_correct = true;
        }
        editor.begin_edit(&question);
        for index in [2, 0, 3, 3, 1] {
            editor.mark_correct(index);
            assert_eq!(correct_count(&editor), 1);
            assert!(editor.draft().unwrap().options[index].is_correct);
        }
    }

    #[test]
    fn test_mark_correct_out_of_range_is_ignored() {
        let mut editor = QuestionEditor::new();
        editor.begin_new();
        editor.mark_correct(1);
        editor.mark_correct(7);
        assert!(editor.draft().unwrap().options[1].is_correct);
    }

    #[test]
    fn test_typing_follows_focus() {
        let mut editor = QuestionEditor::new();
        editor.begin_new();
        for c in "2+2?".chars() {
            editor.insert_char(c);
        }
        editor.focus_next();
        editor.insert_char('3');
        editor.focus_next();
        editor.insert_char('4');
        editor.insert_char('x');
        editor.backspace();
        editor.mark_focused_correct();

        let draft = editor.draft().unwrap();
        assert_eq!(draft.text, "2+2?");
        assert_eq!(draft.options[0].text, "3");
        assert_eq!(draft.options[1].text, "4");
        assert!(draft.options[1].is_correct);
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut editor = QuestionEditor::new();
        editor.begin_new();
        editor.focus_prev();
        assert_eq!(editor.draft().unwrap().focus, DraftField::Option(3));
        editor.focus_next();
        assert_eq!(editor.draft().unwrap().focus, DraftField::Text);
    }

    #[test]
    fn test_submit_new_draft_builds_create() {
        let mut editor = QuestionEditor::new();
        editor.begin_new();
        editor.set_text("Capital of France?");
        editor.set_option_text(0, "Paris");
        editor.mark_correct(0);
        match editor.submit() {
            Some(Ok(StoreRequest::Create { question, .. })) => {
                assert_eq!(question.text(), "Capital of France?");
                assert_eq!(question.options()[0].text, "Paris");
            }
            other => panic!("unexpected submit result: {:?}", other),
        }
        assert!(editor.is_editing());
        assert!(editor.is_submitting());
        assert!(editor.submit().is_none());
    }

    #[test]
    fn test_release_allows_resubmit() {
        let mut editor = QuestionEditor::new();
        editor.begin_edit(&sample_question(1, "Q", 0));
        let token = editor.draft().unwrap().token();
        assert!(matches!(editor.submit(), Some(Ok(_))));
        editor.release(token);
        assert!(!editor.is_submitting());
        assert!(matches!(editor.submit(), Some(Ok(_))));
    }

    #[test]
    fn test_submit_existing_draft_builds_update() {
        let mut editor = QuestionEditor::new();
        editor.begin_edit(&sample_question(9, "Old", 2));
        editor.set_text("New");
        match editor.submit() {
            Some(Ok(StoreRequest::Update { id, question, .. })) => {
                assert_eq!(id, QuestionId::Number(9));
                assert_eq!(question.text(), "New");
            }
            other => panic!("unexpected submit result: {:?}", other),
        }
    }

    #[test]
    fn test_submit_without_correct_option_is_rejected() {
        let mut editor = QuestionEditor::new();
        editor.begin_new();
        editor.set_text("Q");
        assert!(matches!(
            editor.submit(),
            Some(Err(QuestionError::NoCorrectOption))
        ));
    }

    #[test]
    fn test_submit_without_draft_is_none() {
        assert!(QuestionEditor::new().submit().is_none());
    }

    #[test]
    fn test_begin_edit_pads_short_option_list() {
        let mut question = sample_question(3, "Q", 0);
        question.options.truncate(2);
        let mut editor = QuestionEditor::new();
        editor.begin_edit(&question);
        let draft = editor.draft().unwrap();
        assert_eq!(draft.options.len(), 4);
        assert_eq!(draft.options[3], QuestionOption::blank(3));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = QuestionEditor::new();
        editor.begin_edit(&sample_question(1, "Q", 0));
        editor.set_text("changed");
        editor.cancel();
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_finish_ignores_later_draft() {
        let mut editor = QuestionEditor::new();
        editor.begin_edit(&sample_question(1, "Q", 0));
        let first = editor.draft().unwrap().token();
        editor.cancel();
        editor.begin_edit(&sample_question(1, "Q", 0));
        editor.finish(first);
        assert!(editor.is_editing());

        let second = editor.draft().unwrap().token();
        editor.finish(second);
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_forget_drops_draft_for_deleted_question() {
        let mut editor = QuestionEditor::new();
        editor.begin_edit(&sample_question(1, "Q", 0));
        editor.forget(&QuestionId::Number(2));
        assert!(editor.is_editing());
        editor.forget(&QuestionId::Number(1));
        assert!(!editor.is_editing());
    }
}
