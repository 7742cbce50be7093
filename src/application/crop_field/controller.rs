// SPDX-License-Identifier: MPL-2.0
//! Crop field controller.
//!
//! Owns every crop field's state and the registry of live selection widgets.
//! Image loads are asynchronous and may complete out of order, so each load is
//! tagged with a [`LoadTicket`] carrying the field's generation at the time the
//! load started; completions for an older generation are dropped.

use super::handler::{SelectionHandler, SelectionUpdate};
use super::registry::FieldRegistry;
use super::state::{CropFieldState, FieldPhase, ImageInput, SelectionOrigin};
use crate::application::port::{
    LoadedImage, MetadataError, SelectionOptions, SelectionWidgetFactory,
};
use crate::config::CropFieldConfig;
use crate::diagnostics::{DiagnosticEventKind, Diagnostics, HideReason};
use crate::domain::cropping::{
    compute_max_crop, effective_min_dimensions, parse_crop_value, CropRectangle, FieldId,
    SelectionRect,
};
use std::collections::HashMap;

/// Tag of one in-flight image load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    field: FieldId,
    generation: u64,
    is_new: bool,
}

impl LoadTicket {
    #[must_use]
    pub fn field(&self) -> &FieldId {
        &self.field
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the load is for a newly chosen file (as opposed to the stored image).
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }
}

/// Outcome of registering a crop field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInit {
    /// The field stays hidden until an image is chosen (if it can be at all).
    Hidden(HideReason),
    /// The stored image's thumbnail must be loaded and passed to
    /// [`CropFieldController::on_image_ready`] with this ticket.
    LoadThumbnail {
        ticket: LoadTicket,
        thumbnail_url: String,
    },
}

/// Outcome of completing an image load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new selection widget shows this rectangle.
    Applied(CropRectangle),
    /// The load was superseded by a newer one and ignored.
    Stale,
    /// The image could not be read; the field is unchanged.
    Failed,
    /// The field is not (or no longer) part of the form.
    UnknownField,
}

/// Controller of all crop fields of a form.
pub struct CropFieldController<F: SelectionWidgetFactory> {
    factory: F,
    registry: FieldRegistry<F::Widget>,
    fields: HashMap<FieldId, CropFieldState>,
    diagnostics: Diagnostics,
}

impl<F: SelectionWidgetFactory> CropFieldController<F> {
    #[must_use]
    pub fn new(factory: F, diagnostics: Diagnostics) -> Self {
        Self {
            factory,
            registry: FieldRegistry::new(),
            fields: HashMap::new(),
            diagnostics,
        }
    }

    /// Registers a crop field.
    ///
    /// `value` is the crop value stored with the form. The field's image input
    /// is the first of `inputs` named like the field's associated image field.
    /// Registering an id that already exists replaces the previous field.
    pub fn init_field(
        &mut self,
        config: CropFieldConfig,
        value: impl Into<String>,
        inputs: &[ImageInput],
    ) -> FieldInit {
        let id = config.id.clone();
        if self.fields.contains_key(&id) {
            self.remove_field(&id);
        }

        let input = inputs.iter().find(|i| i.name == config.image_field);
        let mut state = CropFieldState::new(config, value.into(), input);

        let init = match input {
            None => FieldInit::Hidden(HideReason::NoImageInput),
            Some(ImageInput {
                thumbnail_url: None,
                ..
            }) => FieldInit::Hidden(HideReason::NoExistingImage),
            Some(ImageInput {
                thumbnail_url: Some(url),
                ..
            }) => {
                state.generation += 1;
                FieldInit::LoadThumbnail {
                    ticket: LoadTicket {
                        field: id.clone(),
                        generation: state.generation,
                        is_new: false,
                    },
                    thumbnail_url: url.clone(),
                }
            }
        };

        match &init {
            FieldInit::Hidden(reason) => {
                self.diagnostics.record(DiagnosticEventKind::FieldHidden {
                    field: id.to_string(),
                    reason: *reason,
                });
            }
            FieldInit::LoadThumbnail { ticket, .. } => {
                self.diagnostics.record(DiagnosticEventKind::LoadStarted {
                    field: id.to_string(),
                    generation: ticket.generation,
                    is_new: false,
                });
            }
        }

        self.fields.insert(id, state);
        init
    }

    /// Starts loading a newly chosen file for a field.
    ///
    /// Every earlier load of the field becomes stale. Returns `None` if the
    /// field is unknown or has no image input to choose a file from.
    pub fn begin_image_change(&mut self, field: &FieldId) -> Option<LoadTicket> {
        let state = self.fields.get_mut(field)?;
        if !state.has_image_input {
            return None;
        }

        state.generation += 1;
        self.diagnostics.record(DiagnosticEventKind::LoadStarted {
            field: field.to_string(),
            generation: state.generation,
            is_new: true,
        });

        Some(LoadTicket {
            field: field.clone(),
            generation: state.generation,
            is_new: true,
        })
    }

    /// Shows a loaded image: replaces the field's selection widget and
    /// computes or restores its crop rectangle.
    ///
    /// The previous widget is destroyed before the new one is created. A new
    /// image always gets a fresh default crop; the stored value is only reused
    /// for the stored image, and only if it fits inside it.
    pub fn on_image_ready(&mut self, ticket: &LoadTicket, image: LoadedImage) -> LoadOutcome {
        let Some(state) = self.fields.get_mut(&ticket.field) else {
            return LoadOutcome::UnknownField;
        };
        if ticket.generation != state.generation {
            self.diagnostics.record(DiagnosticEventKind::StaleLoadDiscarded {
                field: ticket.field.to_string(),
                generation: ticket.generation,
                current: state.generation,
            });
            return LoadOutcome::Stale;
        }

        let field = ticket.field.to_string();
        let true_size = if ticket.is_new {
            state.original_size = Some(image.dimensions);
            image.dimensions
        } else {
            state.original_size.unwrap_or(image.dimensions)
        };

        if self.registry.destroy(&ticket.field) {
            self.diagnostics.record(DiagnosticEventKind::WidgetDestroyed {
                field: field.clone(),
            });
        }

        let config = &state.config;
        let adapt = config.adapt_rotation;
        let effective_min = effective_min_dimensions(config.min_size, true_size, adapt);

        let restored = if ticket.is_new || state.value.is_empty() {
            None
        } else {
            let parsed = parse_crop_value(&state.value);
            let restored = parsed.filter(|rect| rect.fits_within(true_size));
            if restored.is_none() {
                self.diagnostics.record(DiagnosticEventKind::StoredValueIgnored {
                    field: field.clone(),
                    value: state.value.clone(),
                });
            }
            restored
        };

        let rectangle = match restored {
            Some(rect) => {
                self.diagnostics.record(DiagnosticEventKind::StoredValueRestored {
                    field: field.clone(),
                    value: state.value.clone(),
                });
                rect
            }
            None => {
                let rect = compute_max_crop(effective_min, true_size);
                state.value = rect.to_string();
                self.diagnostics.record(DiagnosticEventKind::DefaultCropComputed {
                    field: field.clone(),
                    value: state.value.clone(),
                });
                rect
            }
        };

        let handler = SelectionHandler::new(
            ticket.field.clone(),
            ticket.generation,
            config.min_size,
            config.size_warning,
        );
        let mut options = SelectionOptions::new(
            ticket.field.image_element_id(),
            rectangle,
            true_size,
            handler,
        );
        options.aspect_ratio = config.ratio;
        options.box_width = config.box_max_width;
        options.box_height = config.box_max_height;
        options.size_warning = config.size_warning && rectangle.is_smaller_than(effective_min);

        state.size_warning = options.size_warning;
        state.image = Some(true_size);
        state.rectangle = Some(rectangle);
        state.phase = FieldPhase::HasImage(SelectionOrigin::Initial);
        state.widget_generation = Some(ticket.generation);

        let widget = self.factory.create(options);
        self.registry.register(ticket.field.clone(), widget);

        LoadOutcome::Applied(rectangle)
    }

    /// Records a failed load. The field keeps whatever it showed before.
    pub fn on_load_failed(&mut self, ticket: &LoadTicket, error: &MetadataError) -> LoadOutcome {
        let Some(state) = self.fields.get(&ticket.field) else {
            return LoadOutcome::UnknownField;
        };
        if ticket.generation != state.generation {
            self.diagnostics.record(DiagnosticEventKind::StaleLoadDiscarded {
                field: ticket.field.to_string(),
                generation: ticket.generation,
                current: state.generation,
            });
            return LoadOutcome::Stale;
        }

        log::warn!("Failed to load image for {}: {error}", ticket.field);
        self.diagnostics.record(DiagnosticEventKind::LoadFailed {
            field: ticket.field.to_string(),
            message: error.to_string(),
        });
        LoadOutcome::Failed
    }

    /// Handles a selection-changed event from a field's widget.
    ///
    /// Persists the rounded selection and updates the size warning. Events
    /// from a widget that has since been replaced, and selections with a
    /// non-finite coordinate, are ignored and yield `None`.
    pub fn on_selection_changed(
        &mut self,
        handler: &SelectionHandler,
        selection: SelectionRect,
    ) -> Option<SelectionUpdate> {
        let state = self.fields.get_mut(handler.field())?;
        if state.widget_generation != Some(handler.generation()) {
            return None;
        }
        if !selection.is_finite() {
            log::warn!("Ignoring non-finite selection for {}", handler.field());
            return None;
        }

        let update = handler.evaluate(&selection);
        if let Some(active) = update.size_warning {
            if active != state.size_warning {
                self.diagnostics.record(DiagnosticEventKind::SizeWarningChanged {
                    field: handler.field().to_string(),
                    active,
                });
            }
            state.size_warning = active;
        }

        state.value.clone_from(&update.value);
        state.rectangle = selection.to_crop_rectangle();
        state.phase = FieldPhase::HasImage(SelectionOrigin::UserAdjusted);

        Some(update)
    }

    /// Removes a field from the form, destroying its widget.
    ///
    /// Returns `false` if the field was not registered.
    pub fn remove_field(&mut self, field: &FieldId) -> bool {
        self.registry.destroy(field);
        let removed = self.fields.remove(field).is_some();
        if removed {
            self.diagnostics.record(DiagnosticEventKind::FieldRemoved {
                field: field.to_string(),
            });
        }
        removed
    }

    #[must_use]
    pub fn field(&self, field: &FieldId) -> Option<&CropFieldState> {
        self.fields.get(field)
    }

    /// The persisted crop value of a field.
    #[must_use]
    pub fn value(&self, field: &FieldId) -> Option<&str> {
        self.fields.get(field).map(CropFieldState::value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldId, &CropFieldState)> {
        self.fields.iter()
    }

    #[must_use]
    pub fn registry(&self) -> &FieldRegistry<F::Widget> {
        &self.registry
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::SelectionWidget;
    use crate::domain::cropping::{AspectRatio, CropSize, ExifOrientation, ImageDimensions};
    use std::cell::RefCell;
    use std::num::NonZeroU32;
    use std::rc::Rc;

    // -------------------------------------------------------------------------
    // Fake selection widget
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    enum WidgetCall {
        Created(String, CropRectangle),
        Destroyed(String),
    }

    struct FakeWidget {
        element_id: String,
        calls: Rc<RefCell<Vec<WidgetCall>>>,
    }

    impl SelectionWidget for FakeWidget {
        fn destroy(&mut self) {
            let call = WidgetCall::Destroyed(self.element_id.clone());
            self.calls.borrow_mut().push(call);
        }
    }

    #[derive(Default)]
    struct FakeFactory {
        calls: Rc<RefCell<Vec<WidgetCall>>>,
        created: Vec<SelectionOptions>,
    }

    impl SelectionWidgetFactory for FakeFactory {
        type Widget = FakeWidget;

        fn create(&mut self, options: SelectionOptions) -> FakeWidget {
            let call = WidgetCall::Created(options.element_id.clone(), options.initial);
            self.calls.borrow_mut().push(call);
            let widget = FakeWidget {
                element_id: options.element_id.clone(),
                calls: Rc::clone(&self.calls),
            };
            self.created.push(options);
            widget
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    type TestController = CropFieldController<FakeFactory>;

    fn dims(width: u32, height: u32) -> ImageDimensions {
        ImageDimensions::new(width, height).expect("non-zero dimensions")
    }

    fn image(width: u32, height: u32) -> LoadedImage {
        LoadedImage::new(dims(width, height))
    }

    fn applied(x1: u32, y1: u32, x2: u32, y2: u32) -> LoadOutcome {
        LoadOutcome::Applied(CropRectangle::new(x1, y1, x2, y2))
    }

    fn config(min_width: u32, min_height: u32) -> CropFieldConfig {
        CropFieldConfig::new(
            FieldId::new("id_cropping"),
            FieldId::new("image_field"),
            CropSize::new(min_width, min_height).expect("non-zero size"),
        )
    }

    fn controller() -> TestController {
        CropFieldController::new(FakeFactory::default(), Diagnostics::default())
    }

    fn empty_input() -> Vec<ImageInput> {
        vec![ImageInput::empty(FieldId::new("image_field"))]
    }

    fn stored_input(width: u32, height: u32) -> Vec<ImageInput> {
        vec![ImageInput::with_thumbnail(
            FieldId::new("image_field"),
            "/media/thumb.jpg",
            dims(width, height),
        )]
    }

    fn field() -> FieldId {
        FieldId::new("id_cropping")
    }

    fn field_state(controller: &TestController) -> &CropFieldState {
        controller.field(&field()).expect("field exists")
    }

    fn begin(controller: &mut TestController) -> LoadTicket {
        controller
            .begin_image_change(&field())
            .expect("input exists")
    }

    fn thumbnail_ticket(init: FieldInit) -> LoadTicket {
        match init {
            FieldInit::LoadThumbnail { ticket, .. } => ticket,
            FieldInit::Hidden(reason) => panic!("expected thumbnail load, got {reason:?}"),
        }
    }

    fn init_stored(controller: &mut TestController, min: (u32, u32), value: &str) -> LoadTicket {
        let inputs = stored_input(800, 800);
        thumbnail_ticket(controller.init_field(config(min.0, min.1), value, &inputs))
    }

    // -------------------------------------------------------------------------
    // Initialization
    // -------------------------------------------------------------------------

    #[test]
    fn field_without_image_input_is_hidden() {
        let mut controller = controller();
        let init = controller.init_field(config(120, 100), "", &[]);

        assert_eq!(init, FieldInit::Hidden(HideReason::NoImageInput));
        assert!(field_state(&controller).is_hidden());
        assert_eq!(controller.begin_image_change(&field()), None);
    }

    #[test]
    fn field_with_empty_input_is_hidden_until_file_chosen() {
        let mut controller = controller();
        let init = controller.init_field(config(120, 100), "", &empty_input());
        assert_eq!(init, FieldInit::Hidden(HideReason::NoExistingImage));

        let ticket = begin(&mut controller);
        assert!(ticket.is_new());
        let outcome = controller.on_image_ready(&ticket, image(800, 800));

        assert_eq!(outcome, applied(0, 67, 800, 733));
        let state = field_state(&controller);
        let initial = FieldPhase::HasImage(SelectionOrigin::Initial);
        assert_eq!(state.phase(), initial);
        assert_eq!(state.value(), "0,67,800,733");
    }

    #[test]
    fn first_matching_input_is_used() {
        let mut controller = controller();
        let inputs = vec![
            ImageInput::empty(FieldId::new("other")),
            ImageInput::with_thumbnail(FieldId::new("image_field"), "/a.jpg", dims(10, 10)),
            ImageInput::with_thumbnail(FieldId::new("image_field"), "/b.jpg", dims(20, 20)),
        ];
        let init = controller.init_field(config(1, 1), "", &inputs);
        assert!(matches!(
            init,
            FieldInit::LoadThumbnail { ref thumbnail_url, .. } if thumbnail_url == "/a.jpg"
        ));
    }

    // -------------------------------------------------------------------------
    // Existing images
    // -------------------------------------------------------------------------

    #[test]
    fn stored_value_is_restored_for_existing_image() {
        let mut controller = controller();
        let inputs = stored_input(800, 600);
        let init = controller.init_field(config(120, 100), "10,20,130,120", &inputs);
        let ticket = thumbnail_ticket(init);

        // The thumbnail is smaller than the original; coordinates refer to the original.
        let outcome = controller.on_image_ready(&ticket, image(200, 150));

        assert_eq!(outcome, applied(10, 20, 130, 120));
        let options = &controller.factory().created[0];
        assert_eq!(options.true_size, dims(800, 600));
        assert_eq!(controller.value(&field()), Some("10,20,130,120"));
    }

    #[test]
    fn empty_stored_value_gets_default_crop() {
        let mut controller = controller();
        let ticket = init_stored(&mut controller, (4, 3), "");

        let outcome = controller.on_image_ready(&ticket, image(100, 100));

        assert_eq!(outcome, applied(0, 100, 800, 700));
        assert_eq!(controller.value(&field()), Some("0,100,800,700"));
    }

    #[test]
    fn malformed_stored_value_falls_back_to_default() {
        let mut controller = controller();
        let ticket = init_stored(&mut controller, (4, 3), "garbage");

        let outcome = controller.on_image_ready(&ticket, image(100, 100));

        assert_eq!(outcome, applied(0, 100, 800, 700));
        assert!(controller.diagnostics().kinds().any(|kind| matches!(
            kind,
            DiagnosticEventKind::StoredValueIgnored { value, .. } if value == "garbage"
        )));
    }

    #[test]
    fn out_of_bounds_stored_value_falls_back_to_default() {
        let mut controller = controller();
        let ticket = init_stored(&mut controller, (1, 1), "0,0,900,900");

        let outcome = controller.on_image_ready(&ticket, image(100, 100));
        assert_eq!(outcome, applied(0, 0, 800, 800));
    }

    // -------------------------------------------------------------------------
    // Image replacement
    // -------------------------------------------------------------------------

    #[test]
    fn replacing_image_discards_previous_rectangle() {
        let mut controller = controller();
        let inputs = stored_input(500, 500);
        let init = controller.init_field(config(1, 1), "0,0,500,500", &inputs);
        let ticket = thumbnail_ticket(init);
        controller.on_image_ready(&ticket, image(100, 100));
        assert_eq!(controller.value(&field()), Some("0,0,500,500"));

        let ticket = begin(&mut controller);
        let outcome = controller.on_image_ready(&ticket, image(1000, 600));

        assert_eq!(outcome, applied(200, 0, 800, 600));
        assert_eq!(controller.value(&field()), Some("200,0,800,600"));
    }

    #[test]
    fn previous_widget_is_destroyed_before_new_one_is_created() {
        let mut controller = controller();
        controller.init_field(config(1, 1), "", &empty_input());

        let first = begin(&mut controller);
        controller.on_image_ready(&first, image(100, 100));
        let second = begin(&mut controller);
        controller.on_image_ready(&second, image(200, 100));

        let element_id = "id_cropping-image".to_string();
        let calls = controller.factory().calls.borrow().clone();
        assert_eq!(
            calls,
            vec![
                WidgetCall::Created(element_id.clone(), CropRectangle::new(0, 0, 100, 100)),
                WidgetCall::Destroyed(element_id.clone()),
                WidgetCall::Created(element_id, CropRectangle::new(50, 0, 150, 100)),
            ]
        );
        assert_eq!(controller.registry().len(), 1);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut controller = controller();
        controller.init_field(config(1, 1), "", &empty_input());

        let slow = begin(&mut controller);
        let fast = begin(&mut controller);

        let outcome = controller.on_image_ready(&fast, image(300, 100));
        assert_eq!(outcome, applied(100, 0, 200, 100));

        let stale = controller.on_image_ready(&slow, image(100, 300));
        assert_eq!(stale, LoadOutcome::Stale);
        assert_eq!(controller.value(&field()), Some("100,0,200,100"));
        assert_eq!(controller.factory().created.len(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut controller = controller();
        controller.init_field(config(1, 1), "", &empty_input());
        let first = begin(&mut controller);
        controller.on_image_ready(&first, image(100, 100));

        let broken = begin(&mut controller);
        let error = MetadataError::UnsupportedFormat;
        let outcome = controller.on_load_failed(&broken, &error);

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(controller.value(&field()), Some("0,0,100,100"));
        assert_eq!(controller.registry().len(), 1);
    }

    #[test]
    fn stale_failure_is_recorded_and_ignored() {
        let mut controller = controller();
        controller.init_field(config(1, 1), "", &empty_input());
        let slow = begin(&mut controller);
        let fast = begin(&mut controller);
        controller.on_image_ready(&fast, image(100, 100));

        let error = MetadataError::DecodeFailed("truncated".to_string());
        let outcome = controller.on_load_failed(&slow, &error);

        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(controller.value(&field()), Some("0,0,100,100"));
        let stale = DiagnosticEventKind::StaleLoadDiscarded {
            field: "id_cropping".to_string(),
            generation: 1,
            current: 2,
        };
        let last = controller.diagnostics().kinds().last();
        assert_eq!(last, Some(&stale));
    }

    // -------------------------------------------------------------------------
    // Orientation
    // -------------------------------------------------------------------------

    #[test]
    fn adapt_rotation_rotates_default_crop_for_portrait_image() {
        let mut cfg = config(400, 300);
        cfg.adapt_rotation = true;
        let mut controller = controller();
        controller.init_field(cfg, "", &empty_input());

        let ticket = begin(&mut controller);
        let outcome = controller.on_image_ready(&ticket, image(600, 900));

        // Effective minimum 300x400 (portrait): 600 wide needs 800 high.
        assert_eq!(outcome, applied(0, 50, 600, 850));
    }

    #[test]
    fn exif_rotated_image_uses_displayed_dimensions() {
        let mut cfg = config(400, 300);
        cfg.adapt_rotation = true;
        let mut controller = controller();
        controller.init_field(cfg, "", &empty_input());

        let ticket = begin(&mut controller);
        let rotated = Some(ExifOrientation::Rotate90);
        let image = LoadedImage::oriented(dims(900, 600), rotated);
        let outcome = controller.on_image_ready(&ticket, image);

        assert_eq!(outcome, applied(0, 50, 600, 850));
        assert_eq!(controller.factory().created[0].true_size, dims(600, 900));
    }

    // -------------------------------------------------------------------------
    // Widget options
    // -------------------------------------------------------------------------

    #[test]
    fn widget_receives_field_constraints() {
        let mut cfg = config(120, 100);
        cfg.ratio = AspectRatio::new(1.2);
        cfg.box_max_width = NonZeroU32::new(300);
        let mut controller = controller();
        controller.init_field(cfg, "", &empty_input());

        let ticket = begin(&mut controller);
        controller.on_image_ready(&ticket, image(600, 500));

        let options = &controller.factory().created[0];
        assert_eq!(options.element_id, "id_cropping-image");
        assert_eq!(options.aspect_ratio, AspectRatio::new(1.2));
        assert_eq!(options.min_selection, (5, 5));
        assert_eq!(options.box_width.map(NonZeroU32::get), Some(300));
        assert_eq!(options.box_height, None);
        assert!(!options.size_warning);
    }

    #[test]
    fn initial_warning_set_when_image_smaller_than_minimum() {
        let mut cfg = config(400, 300);
        cfg.size_warning = true;
        let mut controller = controller();
        controller.init_field(cfg, "", &empty_input());

        let ticket = begin(&mut controller);
        controller.on_image_ready(&ticket, image(200, 150));

        let options = &controller.factory().created[0];
        assert!(options.size_warning);
        assert_eq!(options.classes(), "size-warning jcrop-image");
        assert!(field_state(&controller).size_warning());
    }

    // -------------------------------------------------------------------------
    // Selection changes
    // -------------------------------------------------------------------------

    fn shown_controller(size_warning: bool) -> (TestController, SelectionHandler) {
        let mut cfg = config(300, 200);
        cfg.size_warning = size_warning;
        let mut controller = controller();
        controller.init_field(cfg, "", &empty_input());
        let ticket = begin(&mut controller);
        controller.on_image_ready(&ticket, image(900, 600));
        let handler = controller.factory().created[0].handler.clone();
        (controller, handler)
    }

    #[test]
    fn selection_change_toggles_warning() {
        let (mut controller, handler) = shown_controller(true);

        let small = SelectionRect::from_origin_size(0.0, 0.0, 250.0, 210.0);
        let update = controller.on_selection_changed(&handler, small);
        assert_eq!(update.and_then(|u| u.size_warning), Some(true));
        assert!(field_state(&controller).size_warning());

        let large = SelectionRect::from_origin_size(0.0, 0.0, 310.0, 210.0);
        let update = controller.on_selection_changed(&handler, large);
        assert_eq!(update.and_then(|u| u.size_warning), Some(false));
        assert!(!field_state(&controller).size_warning());
    }

    #[test]
    fn selection_change_persists_rounded_value() {
        let (mut controller, handler) = shown_controller(false);

        let selection = SelectionRect::new(10.4, 5.6, 200.2, 150.9);
        controller.on_selection_changed(&handler, selection);

        let state = field_state(&controller);
        let adjusted = FieldPhase::HasImage(SelectionOrigin::UserAdjusted);
        assert_eq!(state.value(), "10,6,200,151");
        assert_eq!(state.rectangle(), Some(CropRectangle::new(10, 6, 200, 151)));
        assert_eq!(state.phase(), adjusted);
        assert!(!state.size_warning());
    }

    #[test]
    fn non_finite_selection_keeps_stored_value() {
        let (mut controller, handler) = shown_controller(false);
        let value = controller.value(&field()).map(str::to_string);

        let selection = SelectionRect::new(f64::NAN, 0.0, 5.0, 5.0);
        let update = controller.on_selection_changed(&handler, selection);

        assert_eq!(update, None);
        assert_eq!(controller.value(&field()).map(str::to_string), value);
        let initial = FieldPhase::HasImage(SelectionOrigin::Initial);
        assert_eq!(field_state(&controller).phase(), initial);
    }

    #[test]
    fn events_from_replaced_widget_are_ignored() {
        let (mut controller, old_handler) = shown_controller(false);
        let ticket = begin(&mut controller);
        controller.on_image_ready(&ticket, image(600, 600));
        let value = controller.value(&field()).map(str::to_string);

        let selection = SelectionRect::new(0.0, 0.0, 10.0, 10.0);
        let update = controller.on_selection_changed(&old_handler, selection);

        assert_eq!(update, None);
        assert_eq!(controller.value(&field()).map(str::to_string), value);
    }

    // -------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------

    #[test]
    fn removing_field_destroys_widget() {
        let (mut controller, handler) = shown_controller(false);

        assert!(controller.remove_field(&field()));
        assert!(controller.registry().is_empty());
        assert!(controller.field(&field()).is_none());

        let selection = SelectionRect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(controller.on_selection_changed(&handler, selection), None);
        assert!(!controller.remove_field(&field()));
    }

    #[test]
    fn completing_load_for_removed_field_is_ignored() {
        let mut controller = controller();
        controller.init_field(config(1, 1), "", &empty_input());
        let ticket = begin(&mut controller);
        controller.remove_field(&field());

        let outcome = controller.on_image_ready(&ticket, image(10, 10));
        assert_eq!(outcome, LoadOutcome::UnknownField);
        assert!(controller.factory().created.is_empty());
    }
}
