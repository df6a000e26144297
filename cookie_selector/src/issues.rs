use {
    bevy::{ecs::system::SystemParam, prelude::*},
    selector_events::SelectorIssue,
};

/// Last reason reported, so a problem that persists across refreshes is only
/// surfaced once.
#[derive(Resource, Debug, Default)]
pub struct IssueLog {
    last: Option<String>,
}

impl IssueLog {
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Reports selector problems to the log and to whoever shows them to the
/// player.
#[derive(SystemParam)]
pub struct Issues<'w, 's> {
    commands: Commands<'w, 's>,
    log: ResMut<'w, IssueLog>,
}

impl Issues<'_, '_> {
    pub fn report(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        if self.log.last.as_deref() == Some(reason.as_str()) {
            return;
        }
        warn!(%reason, "cookie selector issue");
        self.log.last = Some(reason.clone());
        self.commands.trigger(SelectorIssue::new(reason));
    }

    /// Forgets the last reason once things work again.
    pub fn resolved(&mut self) {
        self.log.last = None;
    }
}
