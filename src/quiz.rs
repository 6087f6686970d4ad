use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Catalog, QuizItem, Truth, Variant};
use crate::session::{Choice, Scorecard, SessionId, Tier};

/// Where the gating machine currently stands. Derived from the session
/// fields on every call, never stored, so re-evaluation cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Consent,
    Age,
    Rejected,
    VariantSelect,
    Quiz,
    Scored,
}

/// One participant's run through the questionnaire.
///
/// All randomized state (session id, presentation order, answer-label
/// order) is drawn once and kept for the lifetime of the value; rendering
/// the same session twice always observes identical state.
#[derive(Debug)]
pub struct QuizSession {
    consent: Choice,
    age_confirmed: Choice,
    session_id: Option<SessionId>,
    variant: Option<Variant>,
    items: Vec<QuizItem>,
    presentation_order: Vec<usize>,
    label_order: [Truth; 2],
    answers: Vec<Option<Truth>>,
    scorecard: Option<Scorecard>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self {
            consent: Choice::Unset,
            age_confirmed: Choice::Unset,
            session_id: None,
            variant: None,
            items: Vec::new(),
            presentation_order: Vec::new(),
            label_order: [Truth::Real, Truth::Fake],
            answers: Vec::new(),
            scorecard: None,
        }
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        if !self.consent.is_set() {
            Stage::Consent
        } else if !self.age_confirmed.is_set() {
            Stage::Age
        } else if self.age_confirmed == Choice::No {
            Stage::Rejected
        } else if self.variant.is_none() {
            Stage::VariantSelect
        } else if self.scorecard.is_some() {
            Stage::Scored
        } else {
            Stage::Quiz
        }
    }

    /// Any non-unset consent advances the flow; declining is not treated
    /// differently from agreeing (see the open questions in DESIGN.md).
    pub fn set_consent(&mut self, choice: Choice) {
        self.consent = choice;
    }

    pub fn consent(&self) -> Choice {
        self.consent
    }

    /// Confirming the age gate passes the last gate, so the session id is
    /// assigned here. Assigned at most once; later calls never replace it.
    pub fn set_age_confirmed(&mut self, choice: Choice) {
        self.age_confirmed = choice;
        if choice == Choice::Yes && self.session_id.is_none() {
            self.session_id = Some(SessionId::generate());
        }
    }

    pub fn age_confirmed(&self) -> Choice {
        self.age_confirmed
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    /// Pick a test version. The presentation order and the answer-label
    /// order are drawn here, exactly once; any later call is a no-op so
    /// replayed input can never reshuffle a live quiz.
    pub fn choose_variant(&mut self, variant: Variant) {
        self.choose_variant_with_rng(variant, &mut rand::thread_rng());
    }

    pub fn choose_variant_with_rng<R: Rng>(&mut self, variant: Variant, rng: &mut R) {
        if self.stage() != Stage::VariantSelect {
            return;
        }

        let catalog = Catalog::load(variant);
        let mut order: Vec<usize> = (0..catalog.items.len()).collect();
        order.shuffle(rng);

        self.label_order = if rng.gen_bool(0.5) {
            [Truth::Real, Truth::Fake]
        } else {
            [Truth::Fake, Truth::Real]
        };
        self.answers = vec![None; catalog.items.len()];
        self.presentation_order = order;
        self.items = catalog.items;
        self.variant = Some(variant);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The permutation applied to the catalog for this session.
    pub fn presentation_order(&self) -> &[usize] {
        &self.presentation_order
    }

    /// Left-to-right label ordering used by every item's control.
    pub fn label_order(&self) -> [Truth; 2] {
        self.label_order
    }

    /// Items in the order the participant sees them, keyed by presentation
    /// position.
    pub fn presented(&self) -> impl Iterator<Item = (usize, &QuizItem)> {
        self.presentation_order
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (pos, &self.items[idx]))
    }

    pub fn answer_at(&self, pos: usize) -> Option<Truth> {
        self.answers.get(pos).copied().flatten()
    }

    /// Record the label picked for the item at a presentation position.
    /// Changing an answer after scoring reopens the quiz.
    pub fn answer(&mut self, pos: usize, truth: Truth) {
        if let Some(slot) = self.answers.get_mut(pos) {
            *slot = Some(truth);
            self.scorecard = None;
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        !self.answers.is_empty() && self.answers.iter().all(|a| a.is_some())
    }

    /// Submit the quiz. With any position still unanswered this is a
    /// silent no-op: the caller gets `None` and the session stays as it
    /// was, without surfacing an error.
    pub fn submit(&mut self) -> Option<Scorecard> {
        if !self.is_complete() {
            return None;
        }

        let card = self.compute_scorecard();
        self.scorecard = Some(card);
        Some(card)
    }

    pub fn scorecard(&self) -> Option<&Scorecard> {
        self.scorecard.as_ref()
    }

    fn compute_scorecard(&self) -> Scorecard {
        let truth_totals = self.items.iter().counts_by(|item| item.truth);

        let mut score = 0;
        let mut fake_caught = 0;
        let mut real_spotted = 0;
        for (pos, item) in self.presented() {
            if self.answers[pos] == Some(item.truth) {
                score += 1;
                match item.truth {
                    Truth::Fake => fake_caught += 1,
                    Truth::Real => real_spotted += 1,
                }
            }
        }

        let total = self.items.len();
        Scorecard {
            score,
            total,
            tier: Tier::for_score(score, total),
            fake_caught,
            fake_total: truth_totals.get(&Truth::Fake).copied().unwrap_or(0),
            real_spotted,
            real_total: truth_totals.get(&Truth::Real).copied().unwrap_or(0),
        }
    }
}
