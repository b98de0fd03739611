//! Locale message catalog
//!
//! Every user-facing string the engine can speak or display, in both
//! locales. Kept in one place so the dialogue and classifier code stays
//! free of literal text.

use sahai_voice_core::Language;

/// Bilingual message templates. Methods take the active [`Language`] so a
/// single catalog serves the whole session.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog;

impl MessageCatalog {
    // ----- one-shot classifier -----

    pub fn usage_hint(&self, language: Language) -> String {
        match language {
            Language::English => {
                "I can help you add income, expenses, purchases, and borrowing. \
                 Try commands like 'Add income 500' or 'Expense 200 for food'."
                    .to_string()
            }
            Language::Malayalam => {
                "വരുമാനം, ചെലവുകൾ, വാങ്ങലുകൾ, കടം എന്നിവ ചേർക്കാൻ ഞാൻ സഹായിക്കാം. \
                 '500 വരുമാനം ചേർക്കുക' അല്ലെങ്കിൽ 'ഭക്ഷണത്തിന് 200 ചെലവ്' പോലെ പറയുക."
                    .to_string()
            }
        }
    }

    pub fn amount_missing(&self, language: Language, example: &str) -> String {
        match language {
            Language::English => format!("Please specify the amount. Try: '{example}'"),
            Language::Malayalam => format!("തുക വ്യക്തമാക്കുക. ശ്രമിക്കുക: '{example}'"),
        }
    }

    pub fn amount_example_income(&self, language: Language) -> &'static str {
        match language {
            Language::English => "Add income 500 rupees",
            Language::Malayalam => "500 രൂപ വരുമാനം ചേർക്കുക",
        }
    }

    pub fn amount_example_expense(&self, language: Language) -> &'static str {
        match language {
            Language::English => "Add expense 200 for travel",
            Language::Malayalam => "യാത്രയ്ക്ക് 200 ചെലവ് ചേർക്കുക",
        }
    }

    pub fn amount_example_purchase(&self, language: Language) -> &'static str {
        match language {
            Language::English => "Purchase 1000 from supplier ABC",
            Language::Malayalam => "ABC വിതരണക്കാരനിൽ നിന്ന് 1000 വാങ്ങൽ",
        }
    }

    pub fn amount_example_borrow(&self, language: Language) -> &'static str {
        match language {
            Language::English => "John borrowed 500 rupees",
            Language::Malayalam => "ജോൺ 500 രൂപ കടം വാങ്ങി",
        }
    }

    pub fn supplier_not_recognized(&self, language: Language) -> String {
        match language {
            Language::English => {
                "I couldn't catch the supplier name. Please say it again.".to_string()
            }
            Language::Malayalam => {
                "വിതരണക്കാരന്റെ പേര് മനസ്സിലായില്ല. ദയവായി വീണ്ടും പറയുക.".to_string()
            }
        }
    }

    pub fn borrower_not_recognized(&self, language: Language) -> String {
        match language {
            Language::English => {
                "I couldn't catch the person's name. Please say it again.".to_string()
            }
            Language::Malayalam => {
                "വ്യക്തിയുടെ പേര് മനസ്സിലായില്ല. ദയവായി വീണ്ടും പറയുക.".to_string()
            }
        }
    }

    pub fn income_saved(&self, language: Language, amount: i64, category: &str) -> String {
        match language {
            Language::English => {
                format!("Successfully added income of ₹{amount} in {category} category.")
            }
            Language::Malayalam => {
                format!("₹{amount} വരുമാനം {category} വിഭാഗത്തിൽ വിജയകരമായി ചേർത്തു.")
            }
        }
    }

    pub fn expense_saved(&self, language: Language, amount: i64, category: &str) -> String {
        match language {
            Language::English => {
                format!("Successfully added expense of ₹{amount} in {category} category.")
            }
            Language::Malayalam => {
                format!("₹{amount} ചെലവ് {category} വിഭാഗത്തിൽ വിജയകരമായി ചേർത്തു.")
            }
        }
    }

    pub fn purchase_saved(&self, language: Language, amount: i64, supplier: &str) -> String {
        match language {
            Language::English => {
                format!("Successfully recorded purchase of ₹{amount} from {supplier}.")
            }
            Language::Malayalam => {
                format!("{supplier} ൽ നിന്ന് ₹{amount} വാങ്ങൽ വിജയകരമായി രേഖപ്പെടുത്തി.")
            }
        }
    }

    pub fn borrow_saved(&self, language: Language, amount: i64, borrower: &str) -> String {
        match language {
            Language::English => {
                format!("Successfully recorded ₹{amount} borrowed by {borrower}.")
            }
            Language::Malayalam => {
                format!("{borrower} കടം വാങ്ങിയ ₹{amount} വിജയകരമായി രേഖപ്പെടുത്തി.")
            }
        }
    }

    pub fn persistence_failed(&self, language: Language, error: &str) -> String {
        match language {
            Language::English => format!("Saving failed: {error}. Please try again."),
            Language::Malayalam => format!("സേവ് ചെയ്യാനായില്ല: {error}. ദയവായി വീണ്ടും ശ്രമിക്കുക."),
        }
    }

    /// The primary row was written but the mirrored expense row failed.
    /// Reported distinctly so the user is not told the whole operation
    /// failed when data already changed.
    pub fn partial_success(&self, language: Language, error: &str) -> String {
        match language {
            Language::English => format!(
                "The record was saved, but the matching expense entry failed: {error}."
            ),
            Language::Malayalam => format!(
                "രേഖ സേവ് ചെയ്തു, പക്ഷേ ചെലവ് എൻട്രി പരാജയപ്പെട്ടു: {error}."
            ),
        }
    }

    // ----- dialogue prompts -----

    pub fn ask_supplier(&self, language: Language) -> String {
        match language {
            Language::English => "Which supplier is this purchase from?".to_string(),
            Language::Malayalam => "ഈ വാങ്ങൽ ഏത് വിതരണക്കാരനിൽ നിന്നാണ്?".to_string(),
        }
    }

    pub fn ask_borrower(&self, language: Language) -> String {
        match language {
            Language::English => "Who is borrowing the money?".to_string(),
            Language::Malayalam => "ആരാണ് പണം കടം വാങ്ങുന്നത്?".to_string(),
        }
    }

    pub fn ask_amount(&self, language: Language) -> String {
        match language {
            Language::English => "What is the total amount?".to_string(),
            Language::Malayalam => "ആകെ തുക എത്രയാണ്?".to_string(),
        }
    }

    pub fn ask_paid(&self, language: Language) -> String {
        match language {
            Language::English => "How much has been paid already?".to_string(),
            Language::Malayalam => "ഇതുവരെ എത്ര തുക നൽകി?".to_string(),
        }
    }

    pub fn confirm_summary(
        &self,
        language: Language,
        name: &str,
        amount: &str,
        paid: &str,
    ) -> String {
        match language {
            Language::English => format!(
                "Recording: {name}, total ₹{amount}, paid ₹{paid}. Say yes to save or no to change."
            ),
            Language::Malayalam => format!(
                "രേഖപ്പെടുത്തുന്നു: {name}, ആകെ ₹{amount}, നൽകിയത് ₹{paid}. \
                 സേവ് ചെയ്യാൻ അതെ എന്നും മാറ്റാൻ ഇല്ല എന്നും പറയുക."
            ),
        }
    }

    pub fn confirm_reprompt(&self, language: Language) -> String {
        match language {
            Language::English => "Please answer yes or no.".to_string(),
            Language::Malayalam => "ദയവായി അതെ അല്ലെങ്കിൽ ഇല്ല എന്ന് പറയുക.".to_string(),
        }
    }

    pub fn amount_retry(&self, language: Language) -> String {
        match language {
            Language::English => {
                "I couldn't understand that amount. Please say the total amount again.".to_string()
            }
            Language::Malayalam => {
                "ആ തുക മനസ്സിലായില്ല. ദയവായി ആകെ തുക വീണ്ടും പറയുക.".to_string()
            }
        }
    }

    pub fn paid_retry(&self, language: Language) -> String {
        match language {
            Language::English => {
                "I couldn't understand the paid amount. Please say how much has been paid."
                    .to_string()
            }
            Language::Malayalam => {
                "നൽകിയ തുക മനസ്സിലായില്ല. ദയവായി എത്ര തുക നൽകി എന്ന് പറയുക.".to_string()
            }
        }
    }

    pub fn dialogue_reset(&self, language: Language) -> String {
        match language {
            Language::English => "Okay, starting over. What is the name?".to_string(),
            Language::Malayalam => "ശരി, വീണ്ടും തുടങ്ങുന്നു. പേര് എന്താണ്?".to_string(),
        }
    }

    pub fn dialogue_cancelled(&self, language: Language) -> String {
        match language {
            Language::English => "Cancelled. Nothing was saved.".to_string(),
            Language::Malayalam => "റദ്ദാക്കി. ഒന്നും സേവ് ചെയ്തിട്ടില്ല.".to_string(),
        }
    }

    pub fn recognition_error(&self, language: Language) -> String {
        match language {
            Language::English => {
                "Sorry, I couldn't understand. Please try again.".to_string()
            }
            Language::Malayalam => {
                "ക്ഷമിക്കണം, എനിക്ക് മനസ്സിലായില്ല. ദയവായി വീണ്ടും ശ്രമിക്കുക.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_messages_embed_values() {
        let catalog = MessageCatalog;
        let msg = catalog.income_saved(Language::English, 500, "Sales");
        assert!(msg.contains("₹500"));
        assert!(msg.contains("Sales"));

        let msg = catalog.borrow_saved(Language::Malayalam, 500, "രമേശ്");
        assert!(msg.contains("രമേശ്"));
        assert!(msg.contains("₹500"));
    }

    #[test]
    fn test_partial_success_distinct_from_failure() {
        let catalog = MessageCatalog;
        let partial = catalog.partial_success(Language::English, "timeout");
        let failed = catalog.persistence_failed(Language::English, "timeout");
        assert_ne!(partial, failed);
        assert!(partial.contains("was saved"));
    }

    #[test]
    fn test_confirm_summary_contains_slots() {
        let catalog = MessageCatalog;
        let msg = catalog.confirm_summary(Language::English, "Ramesh", "500", "200");
        assert!(msg.contains("Ramesh"));
        assert!(msg.contains("₹500"));
        assert!(msg.contains("₹200"));
    }
}
