//! Permission decisions driven by per-capability config policy.
//!
//! `allow` and `deny` answer immediately. `ask` shows a Yes/No dialog the
//! first time a capability is requested and remembers the answer for the
//! rest of the session.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use tracing::{debug, info};

use portal_bridge::{Capability, PermissionStatus};
use portal_common::PlatformError;
use portal_config::schema::{PermissionPolicy, PermissionsConfig};

pub struct PolicyPermissions {
    config: PermissionsConfig,
    answers: Mutex<HashMap<Capability, PermissionStatus>>,
}

impl PolicyPermissions {
    pub fn new(config: PermissionsConfig) -> Self {
        Self {
            config,
            answers: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self, capability: Capability) -> PermissionPolicy {
        match capability {
            Capability::Notifications => self.config.notifications,
            Capability::Camera => self.config.camera,
            Capability::MediaLibrary => self.config.media_library,
            Capability::Location => self.config.location,
        }
    }

    pub async fn request(&self, capability: Capability) -> Result<PermissionStatus, PlatformError> {
        match self.policy(capability) {
            PermissionPolicy::Allow => Ok(PermissionStatus::Granted),
            PermissionPolicy::Deny => Ok(PermissionStatus::Denied),
            PermissionPolicy::Ask => {
                if let Some(status) = self.cached(capability) {
                    debug!(%capability, ?status, "using remembered permission answer");
                    return Ok(status);
                }
                let status = prompt(capability).await;
                // Dismissed prompts are asked again next time.
                if status != PermissionStatus::Undetermined {
                    self.remember(capability, status);
                }
                info!(%capability, ?status, "permission prompt answered");
                Ok(status)
            }
        }
    }

    // The map holds plain values, so a panic elsewhere cannot leave it
    // half-written.
    fn answers(&self) -> MutexGuard<'_, HashMap<Capability, PermissionStatus>> {
        self.answers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, capability: Capability) -> Option<PermissionStatus> {
        self.answers().get(&capability).copied()
    }

    fn remember(&self, capability: Capability, status: PermissionStatus) {
        self.answers().insert(capability, status);
    }
}

fn prompt_text(capability: Capability) -> &'static str {
    match capability {
        Capability::Notifications => "Allow this site to show notifications?",
        Capability::Camera => "Allow this site to use the camera?",
        Capability::MediaLibrary => "Allow this site to access your photos?",
        Capability::Location => "Allow this site to access your location?",
    }
}

async fn prompt(capability: Capability) -> PermissionStatus {
    let result = AsyncMessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Permission request")
        .set_description(prompt_text(capability))
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;
    match result {
        MessageDialogResult::Yes | MessageDialogResult::Ok => PermissionStatus::Granted,
        MessageDialogResult::No => PermissionStatus::Denied,
        _ => PermissionStatus::Undetermined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(policy: PermissionPolicy) -> PermissionsConfig {
        PermissionsConfig {
            notifications: policy,
            camera: policy,
            media_library: policy,
            location: policy,
        }
    }

    #[tokio::test]
    async fn allow_policy_grants_without_prompt() {
        let permissions = PolicyPermissions::new(config(PermissionPolicy::Allow));
        for capability in [
            Capability::Notifications,
            Capability::Camera,
            Capability::MediaLibrary,
            Capability::Location,
        ] {
            assert_eq!(
                permissions.request(capability).await.unwrap(),
                PermissionStatus::Granted
            );
        }
    }

    #[tokio::test]
    async fn deny_policy_denies() {
        let permissions = PolicyPermissions::new(config(PermissionPolicy::Deny));
        assert_eq!(
            permissions.request(Capability::Location).await.unwrap(),
            PermissionStatus::Denied
        );
    }

    #[tokio::test]
    async fn remembered_answer_skips_the_prompt() {
        let permissions = PolicyPermissions::new(config(PermissionPolicy::Ask));
        permissions.remember(Capability::Location, PermissionStatus::Denied);
        assert_eq!(
            permissions.request(Capability::Location).await.unwrap(),
            PermissionStatus::Denied
        );
    }

    #[tokio::test]
    async fn poisoned_cache_still_answers() {
        let permissions = PolicyPermissions::new(config(PermissionPolicy::Ask));
        permissions.remember(Capability::Location, PermissionStatus::Granted);

        std::thread::scope(|scope| {
            let outcome = scope
                .spawn(|| {
                    let _guard = permissions.answers.lock().unwrap();
                    panic!("poison the answer cache");
                })
                .join();
            assert!(outcome.is_err());
        });
        assert!(permissions.answers.is_poisoned());

        assert_eq!(
            permissions.request(Capability::Location).await.unwrap(),
            PermissionStatus::Granted
        );
        permissions.remember(Capability::Camera, PermissionStatus::Denied);
        assert_eq!(
            permissions.request(Capability::Camera).await.unwrap(),
            PermissionStatus::Denied
        );
    }

    #[test]
    fn policy_is_per_capability() {
        let permissions = PolicyPermissions::new(PermissionsConfig {
            notifications: PermissionPolicy::Allow,
            camera: PermissionPolicy::Deny,
            media_library: PermissionPolicy::Allow,
            location: PermissionPolicy::Ask,
        });
        assert_eq!(permissions.policy(Capability::Camera), PermissionPolicy::Deny);
        assert_eq!(permissions.policy(Capability::Location), PermissionPolicy::Ask);
    }
}
