//! One editing session: the model, its viewport, the interaction controller and
//! the renderer, wired together the way a host uses them.

use crate::controller::{InputEvent, InteractionController, KeyboardSubscription};
use crate::hit_test::HitTester;
use crate::model::{DiagramModel, Selection, SelectionDetails};
use crate::render::{Renderer, Surface};
use crate::settings::EditorSettings;
use crate::viewport::Viewport;

#[derive(Clone, Debug, Default)]
pub struct Editor {
    model: DiagramModel,
    viewport: Viewport,
    controller: InteractionController,
    renderer: Renderer,
}

impl Editor {
    pub fn new(settings: &EditorSettings) -> Self {
        let viewport = Viewport::default()
            .with_zoom_limits(settings.zoom_step, settings.min_scale)
            .with_reset_translation(settings.reset_translation_on_zoom_reset);
        let hit_tester = HitTester::new(settings.edge_hit_tolerance, settings.snap_margin);
        Self {
            model: DiagramModel::new(),
            viewport,
            controller: InteractionController::new(hit_tester, settings.pan_step),
            renderer: Renderer::new(settings.selection_offset),
        }
    }

    pub fn model(&self) -> &DiagramModel {
        &self.model
    }

    /// Direct model access for callers outside the pointer loop, such as the
    /// label/data panel.
    pub fn model_mut(&mut self) -> &mut DiagramModel {
        &mut self.model
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        self.controller
            .handle(&mut self.model, &mut self.viewport, event)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.renderer.draw(
            surface,
            &self.viewport,
            &self.model,
            self.controller.preview(),
        );
    }

    pub fn attach_keyboard(&mut self) -> KeyboardSubscription {
        self.controller.attach_keyboard()
    }

    pub fn detach_keyboard(&mut self, subscription: KeyboardSubscription) {
        self.controller.detach_keyboard(subscription);
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.model.selection()
    }

    pub fn selection_details(&self) -> Option<SelectionDetails> {
        self.model.selection_details()
    }

    /// Relabels the selected element. No-op without a selection.
    pub fn set_selected_label(&mut self, text: &str) -> bool {
        let Some(id) = self.model.selection().map(|s| s.id.clone()) else {
            return false;
        };
        self.model.set_label(&id, text)
    }

    pub fn set_selected_data(&mut self, text: &str) -> bool {
        let Some(id) = self.model.selection().map(|s| s.id.clone()) else {
            return false;
        };
        self.model.set_data(&id, text)
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn zoom_reset(&mut self) {
        self.viewport.reset();
    }

    pub fn clear(&mut self) {
        self.model.clear();
    }
}
