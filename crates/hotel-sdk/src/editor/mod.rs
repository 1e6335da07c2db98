//! Hotel edit workflow
//!
//! Loads a hotel (or a blank draft for id `0`) into the form, streams field
//! errors while the user types, and saves or deletes through the
//! [`HotelService`]. Successful saves are folded into the shared catalogue so
//! the list screen is current without a re-fetch. Navigation and the delete
//! confirmation dialog belong to the caller.

use crate::client::HotelService;
use crate::error::{Result, SdkError};
use crate::form::HotelForm;
use crate::validation::{ErrorMapper, ErrorStream, FormErrors, ValidationConfig, ValidationRules};
use hotel_client::{Hotel, HotelId};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// What a save attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Hotel stored and published; the caller returns to the list
    Completed(Hotel),
    /// Nothing changed, nothing sent
    Unchanged,
}

/// State of the hotel edit screen
pub struct HotelEditor {
    service: Arc<HotelService>,
    form: HotelForm,
    errors: ErrorStream,
    hotel: Option<Hotel>,
    page_title: Option<String>,
    error_message: Option<String>,
}

impl HotelEditor {
    /// Create an editor with the hotel form's default rules.
    /// Must be called inside a Tokio runtime.
    pub fn new(service: Arc<HotelService>) -> Self {
        Self::with_rules(
            service,
            ValidationRules::hotel_defaults(),
            ValidationConfig::default(),
        )
    }

    pub fn with_rules(
        service: Arc<HotelService>,
        rules: ValidationRules,
        config: ValidationConfig,
    ) -> Self {
        Self {
            service,
            form: HotelForm::new(),
            errors: ErrorStream::spawn(Arc::new(ErrorMapper::new(rules)), config),
            hotel: None,
            page_title: None,
            error_message: None,
        }
    }

    pub fn form(&self) -> &HotelForm {
        &self.form
    }

    pub fn hotel(&self) -> Option<&Hotel> {
        self.hotel.as_ref()
    }

    pub fn page_title(&self) -> Option<&str> {
        self.page_title.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Dismiss the error banner
    pub fn hide_error(&mut self) {
        self.error_message = None;
    }

    /// Latest field errors
    pub fn form_errors(&self) -> FormErrors {
        self.errors.current()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<FormErrors> {
        self.errors.subscribe()
    }

    /// Load the hotel for the route id. Id `0` opens a blank draft.
    pub async fn load(&mut self, id: HotelId) -> Result<()> {
        let hotel = self
            .service
            .get_by_id(id)
            .await?
            .ok_or(SdkError::NotFound(id))?;

        self.display(hotel);
        Ok(())
    }

    fn display(&mut self, hotel: Hotel) {
        self.page_title = Some(if hotel.is_new() {
            "Créer un hotel".to_string()
        } else {
            format!("Modifier hotel {}", hotel.hotel_name)
        });

        self.form.patch_from(&hotel);
        debug!(hotel_id = hotel.id, "Hotel loaded into form");
        self.hotel = Some(hotel);
    }

    /// User edit of a field
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        if self.form.set_value(field, value) {
            self.errors.value_changed(self.form.snapshot());
        }
    }

    /// Field lost focus
    pub fn blur(&mut self, field: &str) {
        if self.form.blur(field) {
            self.errors.blurred(field, self.form.snapshot());
        }
    }

    pub fn add_tag(&mut self) {
        self.form.add_tag();
        self.errors.value_changed(self.form.snapshot());
    }

    pub fn set_tag(&mut self, index: usize, value: impl Into<String>) {
        if self.form.set_tag(index, value) {
            self.errors.value_changed(self.form.snapshot());
        }
    }

    pub fn delete_tag(&mut self, index: usize) {
        if self.form.delete_tag(index) {
            self.errors.value_changed(self.form.snapshot());
        }
    }

    /// Validate and store the form.
    ///
    /// From the first call on, field errors update without debounce. A
    /// failed save keeps the form dirty so the user can retry.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        self.errors.mark_submitted();
        self.errors.value_changed(self.form.snapshot());

        if !self.form.is_valid() {
            let err = SdkError::Validation;
            self.error_message = Some(err.user_message());
            return Err(err);
        }

        if !self.form.is_dirty() {
            debug!("Form pristine, nothing to save");
            return Ok(SaveOutcome::Unchanged);
        }

        let base = self.hotel.clone().unwrap_or_default();
        let hotel = self.form.merge_into(&base);

        let result = if hotel.is_new() {
            self.service.create(&hotel).await
        } else {
            self.service.update(&hotel).await
        };

        match result {
            Ok(saved) => {
                info!(hotel_id = saved.id, "Hotel saved");
                self.complete(CompletedChange::Saved(saved.clone()))?;
                Ok(SaveOutcome::Completed(saved))
            }
            Err(err) => {
                warn!(error = %err, "Hotel save failed");
                self.error_message = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Delete the loaded hotel and evict it from the catalogue.
    ///
    /// Returns the deleted id, or `None` when nothing stored is loaded.
    pub async fn delete(&mut self) -> Result<Option<HotelId>> {
        let id = match self.hotel.as_ref() {
            Some(hotel) if !hotel.is_new() => hotel.id,
            _ => return Ok(None),
        };

        if let Err(err) = self.service.delete(id).await {
            self.error_message = Some(err.user_message());
            return Err(err);
        }

        self.complete(CompletedChange::Deleted(id))?;
        Ok(Some(id))
    }

    fn complete(&mut self, change: CompletedChange) -> Result<()> {
        match change {
            CompletedChange::Saved(hotel) => self.service.publish_local_change(hotel)?,
            CompletedChange::Deleted(id) => self.service.publish_local_removal(id)?,
        }

        self.form.reset();
        self.errors.clear_submitted();
        self.error_message = None;
        Ok(())
    }
}

enum CompletedChange {
    Saved(Hotel),
    Deleted(HotelId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ServiceConfig;
    use crate::form::{HOTEL_NAME, PRICE, RATING};
    use crate::test_support::{init_tracing, FakeBackend};
    use hotel_client::ClientError;
    use std::sync::atomic::Ordering;

    fn stored(id: u64, name: &str) -> Hotel {
        Hotel {
            id,
            hotel_name: name.to_string(),
            price: 100.0,
            rating: 4,
            ..Default::default()
        }
    }

    fn setup(hotels: Vec<Hotel>) -> (Arc<FakeBackend>, Arc<HotelService>, HotelEditor) {
        init_tracing();
        let backend = Arc::new(FakeBackend::with_hotels(hotels));
        let service = Arc::new(HotelService::new(backend.clone(), ServiceConfig::default()));
        let editor = HotelEditor::new(service.clone());
        (backend, service, editor)
    }

    #[tokio::test]
    async fn test_load_new_draft() {
        let (backend, _service, mut editor) = setup(vec![]);

        editor.load(0).await.unwrap();

        assert_eq!(editor.page_title(), Some("Créer un hotel"));
        assert_eq!(editor.hotel(), Some(&Hotel::default()));
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_load_existing() {
        let (_backend, _service, mut editor) = setup(vec![stored(3, "Gamma Lodge")]);

        editor.load(3).await.unwrap();

        assert_eq!(editor.page_title(), Some("Modifier hotel Gamma Lodge"));
        let name = editor.form().control(HOTEL_NAME).unwrap().value();
        assert_eq!(name, "Gamma Lodge");
        assert!(matches!(editor.load(99).await, Err(SdkError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_invalid_save_sends_nothing() {
        let (backend, _service, mut editor) = setup(vec![]);
        editor.load(0).await.unwrap();
        let mut errors = editor.subscribe_errors();

        // A new draft loads price "0", which satisfies `required`
        editor.set_value(HOTEL_NAME, "abc");
        editor.set_value(PRICE, "");
        let err = editor.save().await.unwrap_err();

        assert_eq!(err, SdkError::Validation);
        assert_eq!(editor.error_message(), Some("Corrigez les erreurs svp"));
        assert_eq!(backend.creates.load(Ordering::SeqCst), 0);

        // Submit bypasses the debounce
        let shown = errors
            .wait_for(|shown| shown.contains_key(PRICE))
            .await
            .unwrap()
            .clone();
        assert_eq!(
            shown[HOTEL_NAME],
            "Le nom de l'hotel doit comporter au moins 4 caractères"
        );
        assert_eq!(shown[PRICE], "Le prix de l'hôtel est obligatoire");

        editor.hide_error();
        assert_eq!(editor.error_message(), None);
    }

    #[tokio::test]
    async fn test_pristine_save_is_noop() {
        let (backend, _service, mut editor) = setup(vec![stored(3, "Gamma Lodge")]);
        editor.load(3).await.unwrap();

        assert_eq!(editor.save().await.unwrap(), SaveOutcome::Unchanged);
        assert_eq!(backend.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_publishes_to_catalog() {
        let (backend, service, mut editor) = setup(vec![stored(1, "Alpha Inn")]);
        backend.set_next_id(7);
        let mut list = service.get_all();
        list.next().await.unwrap().unwrap();

        editor.load(0).await.unwrap();
        editor.set_value(HOTEL_NAME, "Xanadu");
        editor.set_value(PRICE, "50");
        editor.set_value(RATING, "5");

        let outcome = editor.save().await.unwrap();
        let SaveOutcome::Completed(saved) = outcome else {
            panic!("expected a completed save");
        };
        assert_eq!(saved.id, 7);
        assert_eq!(saved.price, 50.0);
        assert!(!editor.form().is_dirty());

        let hotels = list.next().await.unwrap().unwrap();
        let ids: Vec<_> = hotels.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 7]);
    }

    #[tokio::test]
    async fn test_update_replaces_in_catalog() {
        let (_backend, service, mut editor) =
            setup(vec![stored(1, "Alpha Inn"), stored(2, "Beta Inn")]);
        let mut list = service.get_all();
        list.next().await.unwrap().unwrap();

        editor.load(1).await.unwrap();
        editor.set_value(PRICE, "60");
        editor.save().await.unwrap();

        let hotels = list.next().await.unwrap().unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].id, 1);
        assert_eq!(hotels[0].price, 60.0);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_dirty() {
        let (backend, _service, mut editor) = setup(vec![stored(1, "Alpha Inn")]);
        editor.load(1).await.unwrap();
        editor.set_value(PRICE, "75");
        let refused = ClientError::Transport("connection refused".to_string());
        backend.fail_with(Some(refused));

        let err = editor.save().await.unwrap_err();

        assert!(matches!(err, SdkError::Client(ClientError::Transport(_))));
        assert!(editor.form().is_dirty());
        let message = editor.error_message().unwrap();
        let prefix = hotel_client::error::USER_MESSAGE_PREFIX;
        assert!(message.starts_with(prefix));
        assert!(message.contains("connection refused"));

        // Retry succeeds once the backend is back
        backend.fail_with(None);
        assert!(matches!(editor.save().await, Ok(SaveOutcome::Completed(_))));
    }

    #[tokio::test]
    async fn test_delete_evicts_from_catalog() {
        let (backend, service, mut editor) =
            setup(vec![stored(1, "Alpha Inn"), stored(2, "Beta Inn")]);
        let mut list = service.get_all();
        list.next().await.unwrap().unwrap();

        editor.load(2).await.unwrap();
        assert_eq!(editor.delete().await.unwrap(), Some(2));
        assert_eq!(backend.deletes.load(Ordering::SeqCst), 1);

        let hotels = list.next().await.unwrap().unwrap();
        let ids: Vec<_> = hotels.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_delete_draft_is_noop() {
        let (backend, _service, mut editor) = setup(vec![]);
        editor.load(0).await.unwrap();

        assert_eq!(editor.delete().await.unwrap(), None);
        assert_eq!(backend.total_calls(), 0);
    }
}
