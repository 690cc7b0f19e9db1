//! # Draft Tiers
//!
//! Tiers added in the settings form before they are saved. Each draft gets a
//! negative sentinel id so it can sit in the same list as persisted tiers
//! without colliding with a server id.
//!
//! ```text
//! add("VIP")      ──► -1
//! add("Staff")    ──► -2
//! remove(-1)      ──► dropped locally, nothing sent to the server
//! pending()       ──► [-2 Staff]
//! mark_saved(-2)  ──► []
//! ```

use crate::types::{NewPriceTier, TierInput};
use crate::validation::ValidationResult;

/// Whether an id belongs to an unsaved draft.
#[inline]
pub const fn is_draft_id(id: i64) -> bool {
    id < 0
}

/// A validated tier waiting to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftTier {
    pub id: i64,
    pub tier: NewPriceTier,
}

/// Ordered collection of unsaved tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftBook {
    next_id: i64,
    drafts: Vec<DraftTier>,
}

impl Default for DraftBook {
    fn default() -> Self {
        DraftBook::new()
    }
}

impl DraftBook {
    pub fn new() -> Self {
        DraftBook {
            next_id: -1,
            drafts: Vec::new(),
        }
    }

    /// Validates and appends a draft. Ids are never reused within a book.
    pub fn add(&mut self, input: &TierInput) -> ValidationResult<DraftTier> {
        let tier = input.validate()?;
        let draft = DraftTier {
            id: self.next_id,
            tier,
        };
        self.next_id -= 1;

        self.drafts.push(draft.clone());
        Ok(draft)
    }

    /// Drops a draft. Returns it if it existed.
    pub fn remove(&mut self, id: i64) -> Option<DraftTier> {
        let index = self.drafts.iter().position(|d| d.id == id)?;
        Some(self.drafts.remove(index))
    }

    pub fn get(&self, id: i64) -> Option<&DraftTier> {
        self.drafts.iter().find(|d| d.id == id)
    }

    /// Drafts still to be saved, in insertion order.
    pub fn pending(&self) -> &[DraftTier] {
        &self.drafts
    }

    /// Removes the drafts that were persisted; failed ones stay pending.
    pub fn mark_saved(&mut self, ids: &[i64]) {
        self.drafts.retain(|d| !ids.contains(&d.id));
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::pricing::{PricingRuleInput, PricingRules};

    fn input(name: &str, markup: Option<f64>) -> TierInput {
        TierInput {
            name: name.to_string(),
            description: None,
            pricing_rules: Some(PricingRuleInput::Legacy(PricingRules {
                markup_percentage: markup,
                discount_percentage: None,
            })),
            is_active: None,
        }
    }

    #[test]
    fn test_ids_are_negative_and_unique() {
        let mut book = DraftBook::new();
        let a = book.add(&input("VIP", Some(10.0))).unwrap().id;
        let b = book.add(&input("Staff", Some(5.0))).unwrap().id;
        book.remove(a);
        let c = book.add(&input("Retail", Some(1.0))).unwrap().id;

        assert_eq!((a, b, c), (-1, -2, -3));
        assert!(is_draft_id(a));
        assert!(!is_draft_id(1));
    }

    #[test]
    fn test_invalid_draft_is_not_added() {
        let mut book = DraftBook::new();
        assert_eq!(
            book.add(&input("VIP", None)).unwrap_err(),
            ValidationError::MissingPricingRule
        );
        assert!(book.add(&input("  ", Some(1.0))).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_mark_saved_keeps_failures() {
        let mut book = DraftBook::new();
        book.add(&input("A", Some(1.0))).unwrap();
        book.add(&input("B", Some(2.0))).unwrap();
        book.add(&input("C", Some(3.0))).unwrap();

        book.mark_saved(&[-1, -3]);
        assert_eq!(book.len(), 1);
        assert_eq!(book.pending()[0].tier.name, "B");
        assert!(book.get(-2).is_some());
    }

    #[test]
    fn test_clear_empties_book() {
        let mut book = DraftBook::new();
        book.add(&input("A", Some(1.0))).unwrap();
        assert_eq!(book.pending().len(), 1);

        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.add(&input("B", Some(1.0))).unwrap().id, -2);
    }
}
