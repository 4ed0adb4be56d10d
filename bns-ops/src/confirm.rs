//! Confirmation policies for updater warnings.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bns_core::constants::CONFIRM_DELAY_SECS;
use bns_core::traits::Confirmer;
use bns_core::types::UpdateWarning;

/// How warnings that need confirmation are handled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConfirmPolicy {
    /// Always continue after waiting `delay_secs`.
    AutoProceed {
        /// Pause before continuing
        delay_secs: u64,
    },
    /// Ask the operator on the terminal.
    Prompt,
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        ConfirmPolicy::AutoProceed {
            delay_secs: CONFIRM_DELAY_SECS,
        }
    }
}

impl ConfirmPolicy {
    /// Builds the confirmer for this policy.
    pub fn confirmer(&self) -> Box<dyn Confirmer> {
        match self {
            ConfirmPolicy::AutoProceed { delay_secs } => {
                Box::new(AutoConfirm::new(Duration::from_secs(*delay_secs)))
            }
            ConfirmPolicy::Prompt => Box::new(PromptConfirm),
        }
    }
}

/// Continues after a fixed pause; never aborts.
#[derive(Clone, Debug)]
pub struct AutoConfirm {
    delay: Duration,
}

impl AutoConfirm {
    /// Creates a confirmer that waits `delay` before answering yes.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, warning: &UpdateWarning) -> bool {
        info!(
            %warning,
            delay_secs = self.delay.as_secs(),
            "Proceeding after delay (assuming yes)"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        true
    }
}

/// Asks the operator with a yes/no prompt. Defaults to no.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptConfirm;

#[async_trait]
impl Confirmer for PromptConfirm {
    async fn confirm(&self, warning: &UpdateWarning) -> bool {
        let prompt = format!("{warning}\nDo you want to continue anyway?");

        let answer = tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(yes)) => yes,
            Ok(Err(e)) => {
                warn!(error = %e, "Could not read confirmation, treating as no");
                false
            }
            Err(e) => {
                warn!(error = %e, "Confirmation prompt task failed, treating as no");
                false
            }
        }
    }
}
