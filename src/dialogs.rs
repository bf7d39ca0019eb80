//! Create/edit/details/delete dialog flows.
//!
//! Dialogs validate locally before anything reaches the store and
//! mutate the event cache only on a confirmed success. Closing a
//! dialog never cancels an in-flight submission; a late response is
//! still applied to the cache.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use calgrid_core::protocol::{EventPatch, EventPayload};
use calgrid_core::{CalendarSettings, Event, ValidationError};

use crate::cache::EventCache;
use crate::notify::{ErrorKind, Notifier};
use crate::store::CalendarStore;

/// Form state of the create/edit dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_all_day: bool,
    pub notification: bool,
    pub notification_time: i64,
}

impl EventDraft {
    /// Fresh draft for a date click: one hour long, notification
    /// defaults taken from the user's settings.
    pub fn new(start: DateTime<Utc>, settings: &CalendarSettings) -> Self {
        EventDraft {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            start,
            end: start + Duration::hours(1),
            is_all_day: false,
            notification: settings.notifications_enabled,
            notification_time: settings.default_notification_time,
        }
    }

    /// Draft pre-populated from the event an edit dialog targets.
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            start: event.start,
            end: event.end,
            is_all_day: event.is_all_day,
            notification: event.notification,
            notification_time: event.notification_time,
        }
    }

    /// Required-field checks, run before submission.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.end < self.start {
            return Err(ValidationError::EndBeforeStart);
        }
        if self.notification_time < 0 {
            return Err(ValidationError::NegativeLeadTime);
        }
        Ok(())
    }

    fn optional(text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    fn payload(&self, user_id: &str) -> EventPayload {
        EventPayload {
            title: self.title.trim().to_string(),
            description: Self::optional(&self.description),
            location: Self::optional(&self.location),
            start: self.start,
            end: self.end,
            is_all_day: self.is_all_day,
            notification: self.notification,
            notification_time: self.notification_time,
            user_id: user_id.to_string(),
        }
    }

    fn patch(&self) -> EventPatch {
        EventPatch {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            location: Some(self.location.trim().to_string()),
            start: Some(self.start),
            end: Some(self.end),
            is_all_day: Some(self.is_all_day),
            notification: Some(self.notification),
            notification_time: Some(self.notification_time),
        }
    }
}

/// Which modal is open.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Create(EventDraft),
    Edit { event_id: String, draft: EventDraft },
    Details { event_id: String },
    ConfirmDelete { event_id: String },
}

/// Result of a submit action.
#[derive(Debug, Clone, PartialEq)]
pub enum Submit {
    /// Stored and applied to the cache; the dialog closed.
    Saved,
    /// Local validation failed; the dialog stays open.
    Invalid(ValidationError),
    /// The store rejected it; a notice was raised, the dialog stays
    /// open for another attempt.
    Failed,
}

/// Modal flow controller for event create/edit/details/delete.
#[derive(Debug, Default)]
pub struct DialogController {
    open: Option<Dialog>,
}

impl DialogController {
    pub fn new() -> Self {
        DialogController::default()
    }

    pub fn current(&self) -> Option<&Dialog> {
        self.open.as_ref()
    }

    pub fn open_create(&mut self, draft: EventDraft) {
        self.open = Some(Dialog::Create(draft));
    }

    pub fn open_edit(&mut self, event: &Event) {
        self.open = Some(Dialog::Edit {
            event_id: event.id.clone(),
            draft: EventDraft::from_event(event),
        });
    }

    pub fn open_details(&mut self, event_id: impl Into<String>) {
        self.open = Some(Dialog::Details {
            event_id: event_id.into(),
        });
    }

    pub fn open_delete(&mut self, event_id: impl Into<String>) {
        self.open = Some(Dialog::ConfirmDelete {
            event_id: event_id.into(),
        });
    }

    /// Dismiss whatever is open. Does not cancel in-flight requests.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Edit the draft of an open create/edit dialog in place.
    pub fn edit_draft(&mut self, mutate: impl FnOnce(&mut EventDraft)) {
        match self.open.as_mut() {
            Some(Dialog::Create(draft)) | Some(Dialog::Edit { draft, .. }) => mutate(draft),
            _ => {}
        }
    }

    /// Submit the open create dialog.
    pub async fn submit_create<S: CalendarStore>(
        &mut self,
        user_id: &str,
        cache: &mut EventCache,
        store: &S,
        notifier: &mut Notifier,
    ) -> Submit {
        let Some(Dialog::Create(draft)) = self.open.clone() else {
            return Submit::Failed;
        };
        if let Err(err) = draft.validate() {
            return Submit::Invalid(err);
        }

        match store.create_event(&draft.payload(user_id)).await {
            Ok(event) => {
                info!(event_id = %event.id, "event created");
                cache.insert(event);
                self.close();
                notifier.success("Event created");
                Submit::Saved
            }
            Err(err) => {
                notifier.failure(ErrorKind::EventCreateFailed, &err);
                Submit::Failed
            }
        }
    }

    /// Submit the open edit dialog.
    pub async fn submit_edit<S: CalendarStore>(
        &mut self,
        cache: &mut EventCache,
        store: &S,
        notifier: &mut Notifier,
    ) -> Submit {
        let Some(Dialog::Edit { event_id, draft }) = self.open.clone() else {
            return Submit::Failed;
        };
        if let Err(err) = draft.validate() {
            return Submit::Invalid(err);
        }

        match store.update_event(&event_id, &draft.patch()).await {
            Ok(event) => {
                info!(event_id = %event.id, "event updated");
                cache.insert(event);
                self.close();
                notifier.success("Event updated");
                Submit::Saved
            }
            Err(err) => {
                notifier.failure(ErrorKind::EventUpdateFailed, &err);
                Submit::Failed
            }
        }
    }

    /// Fire the confirmed delete. No optimistic removal: the cache
    /// changes only on success, a failure leaves it untouched.
    pub async fn delete_event<S: CalendarStore>(
        &mut self,
        event_id: &str,
        cache: &mut EventCache,
        store: &S,
        notifier: &mut Notifier,
    ) -> bool {
        self.close();
        match store.delete_event(event_id).await {
            Ok(()) => {
                cache.remove(event_id);
                notifier.success("Event deleted");
                true
            }
            Err(err) => {
                debug!(event_id, "delete failed, cache untouched");
                notifier.failure(ErrorKind::EventDeleteFailed, &err);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.open = None;
    }
}
