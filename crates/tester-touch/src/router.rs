//! Control hit-testing and the full touch pipeline.

use crate::confirm::PressConfirmer;
use crate::geometry::{Point, Rect};
use crate::normalize::{HitTest, PointerPhase, RawTouch, TouchIntent, TouchNormalizer};

/// On-screen controls, later entries drawn on top.
#[derive(Clone, Debug)]
pub struct ControlLayer<Id> {
    controls: Vec<(Id, Rect)>,
}

impl<Id> Default for ControlLayer<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> ControlLayer<Id> {
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
        }
    }

    pub fn with(mut self, id: Id, bounds: Rect) -> Self {
        self.push(id, bounds);
        self
    }

    pub fn push(&mut self, id: Id, bounds: Rect) {
        self.controls.push((id, bounds));
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, &Rect)> {
        self.controls.iter().map(|(id, r)| (id, r))
    }
}

impl<Id: PartialEq> ControlLayer<Id> {
    pub fn bounds(&self, id: &Id) -> Option<Rect> {
        self.controls
            .iter()
            .rev()
            .find(|(c, _)| c == id)
            .map(|(_, r)| *r)
    }
}

impl<Id: Clone> HitTest for ControlLayer<Id> {
    type Target = Id;

    fn control_at(&self, point: Point) -> Option<Id> {
        self.controls
            .iter()
            .rev()
            .find(|(_, r)| r.contains(point))
            .map(|(id, _)| id.clone())
    }
}

/// Raw touches in, confirmed control activations out.
#[derive(Clone, Debug)]
pub struct TouchRouter<Id> {
    layer: ControlLayer<Id>,
    normalizer: TouchNormalizer<Id>,
    confirmer: PressConfirmer<Id>,
}

impl<Id: Clone + PartialEq> TouchRouter<Id> {
    pub fn new(layer: ControlLayer<Id>, confirm_delay_ms: u64) -> Self {
        Self {
            layer,
            normalizer: TouchNormalizer::new(),
            confirmer: PressConfirmer::new(confirm_delay_ms),
        }
    }

    pub fn layer(&self) -> &ControlLayer<Id> {
        &self.layer
    }

    /// Swap in the controls of a new screen. Any touch or press in progress
    /// is dropped.
    pub fn set_layer(&mut self, layer: ControlLayer<Id>) {
        self.layer = layer;
        self.normalizer.reset();
        self.confirmer.cancel();
    }

    pub fn handle(&mut self, event: RawTouch, now_ms: u64) -> Option<TouchIntent<Id>> {
        let intent = self.normalizer.handle(event, &self.layer)?;
        match intent.phase {
            PointerPhase::Press => {
                if let Some(bounds) = self.layer.bounds(&intent.target) {
                    self.confirmer
                        .press(intent.target.clone(), bounds, intent.position, now_ms);
                }
            }
            PointerPhase::Move | PointerPhase::Release => self.confirmer.track(intent.position),
        }
        Some(intent)
    }

    /// Control activated by a press whose confirmation delay has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<Id> {
        self.confirmer.poll(now_ms)
    }
}
