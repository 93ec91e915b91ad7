use crate::core::models::ids::StructureKey;
use crate::core::models::orientation::Orientation;
use crate::core::models::scores::PairScore;
use crate::core::models::structure::{Structure, StructureHandle, TransformError};
use crate::engine::error::EngineError;
use crate::workflows::quick::quick_scores;
use nalgebra::Vector3;
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// A user manipulation of the session, routed by [`Session::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Selects a structure. Without `multi_select` it replaces the current selection.
    /// Already selected or locked structures are left alone.
    Select { key: StructureKey, multi_select: bool },
    /// Selects an unselected structure (adding to the selection) or deselects a selected one.
    Toggle { key: StructureKey },
    Deselect { key: StructureKey },
    ClearSelection,
    Lock { key: StructureKey },
    /// Has no effect on structures locked when they were added.
    Unlock { key: StructureKey },
    /// World-space rotation of `angle` radians about `axis`, applied to every
    /// selected unlocked structure.
    Rotate { axis: Vector3<f64>, angle: f64 },
    RotateBy(Orientation),
    Translate(Vector3<f64>),
    /// Multiplies the scale of every selected unlocked structure.
    Scale { factor: f64 },
    /// Places a single structure in the given orientation, regardless of selection.
    SetOrientation {
        key: StructureKey,
        orientation: Orientation,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The interaction changed the selection, locks or transforms of `affected` structures.
    Applied { affected: usize },
    /// Nothing to do; the session is unchanged.
    Ignored,
}

/// Interactive state over a collection of structures: selection, locks, transforms,
/// and the quick scores of the current selection.
///
/// Every interaction is all-or-nothing. A transform that would leave any target in an
/// invalid state is rejected as a whole and every structure keeps its last good value.
#[derive(Debug, Default)]
pub struct Session {
    structures: SlotMap<StructureKey, Structure>,
    order: Vec<StructureKey>,
    selected: HashSet<StructureKey>,
    locked: HashSet<StructureKey>,
    hard_locked: HashSet<StructureKey>,
    scores: Vec<Vec<PairScore>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a structure at the end of the collection. A `hard_locked` structure can
    /// never be selected, unlocked or transformed through interactions.
    pub fn add(&mut self, structure: Structure, hard_locked: bool) -> Result<StructureKey, EngineError> {
        if structure.is_empty() {
            return Err(EngineError::degenerate(
                "session_add",
                format!("structure '{}' has no landmarks", structure.id()),
            ));
        }
        if self.key_of(structure.id()).is_some() {
            return Err(EngineError::degenerate(
                "session_add",
                format!("a structure with id '{}' is already loaded", structure.id()),
            ));
        }

        debug!(id = structure.id(), hard_locked, "Adding structure to session.");
        let key = self.structures.insert(structure);
        self.order.push(key);
        if hard_locked {
            self.hard_locked.insert(key);
        }
        Ok(key)
    }

    /// Takes a structure out of the session. The remaining selection is rescored
    /// first, so a failure leaves the session untouched.
    pub fn remove(&mut self, key: StructureKey) -> Result<Structure, EngineError> {
        let key = self.existing(key)?;
        let mut selection = self.selected.clone();
        selection.remove(&key);
        let scores = self.compute_scores(&selection, &HashMap::new(), Some(key))?;

        let structure = self
            .structures
            .remove(key)
            .ok_or_else(|| EngineError::StructureNotFound(format!("{key:?}")))?;
        self.order.retain(|&k| k != key);
        self.locked.remove(&key);
        self.hard_locked.remove(&key);
        self.selected = selection;
        self.scores = scores;
        Ok(structure)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, key: StructureKey) -> Option<&Structure> {
        self.structures.get(key)
    }

    pub fn key_of(&self, id: &str) -> Option<StructureKey> {
        self.order
            .iter()
            .copied()
            .find(|&key| self.structures.get(key).is_some_and(|s| s.id() == id))
    }

    /// Structures in the order they were added.
    pub fn structures(&self) -> impl Iterator<Item = (StructureKey, &Structure)> {
        self.order
            .iter()
            .filter_map(|&key| self.structures.get(key).map(|s| (key, s)))
    }

    /// Selected structures in collection order.
    pub fn selection(&self) -> Vec<StructureKey> {
        self.ordered(&self.selected)
    }

    pub fn is_selected(&self, key: StructureKey) -> bool {
        self.selected.contains(&key)
    }

    pub fn is_locked(&self, key: StructureKey) -> bool {
        self.locked.contains(&key) || self.hard_locked.contains(&key)
    }

    pub fn is_hard_locked(&self, key: StructureKey) -> bool {
        self.hard_locked.contains(&key)
    }

    /// Quick scores of the current selection against the whole collection, as of the
    /// last interaction that could change them.
    pub fn quick_scores(&self) -> &[Vec<PairScore>] {
        &self.scores
    }

    #[instrument(skip_all, name = "session_apply")]
    pub fn apply(&mut self, interaction: Interaction) -> Result<InteractionOutcome, EngineError> {
        match interaction {
            Interaction::Select { key, multi_select } => self.select(key, multi_select),
            Interaction::Toggle { key } => {
                if self.is_selected(self.existing(key)?) {
                    self.deselect(key)
                } else {
                    self.select(key, true)
                }
            }
            Interaction::Deselect { key } => self.deselect(key),
            Interaction::ClearSelection => {
                if self.selected.is_empty() {
                    return Ok(InteractionOutcome::Ignored);
                }
                self.commit_selection(HashSet::new(), HashMap::new())
            }
            Interaction::Lock { key } => {
                let key = self.existing(key)?;
                Ok(applied_if(self.locked.insert(key), 1))
            }
            Interaction::Unlock { key } => {
                let key = self.existing(key)?;
                Ok(applied_if(self.locked.remove(&key), 1))
            }
            Interaction::Rotate { axis, angle } => {
                let delta = Orientation::from_axis_angle(&axis, angle)
                    .map_err(|source| self.transform_error(None, source.into()))?;
                self.transform_selection(true, |s| s.rotate_by(&delta))
            }
            Interaction::RotateBy(delta) => self.transform_selection(true, |s| s.rotate_by(&delta)),
            Interaction::Translate(delta) => self.transform_selection(false, |s| s.translate(&delta)),
            Interaction::Scale { factor } => {
                self.transform_selection(false, |s| s.multiply_scale(factor))
            }
            Interaction::SetOrientation { key, orientation } => {
                let key = self.existing(key)?;
                let mut staged = HashMap::new();
                if let Some(structure) = self.structures.get(key) {
                    let mut updated = structure.clone();
                    updated.set_orientation(orientation);
                    staged.insert(key, updated);
                }
                self.commit_selection(self.selected.clone(), staged)
            }
        }
    }

    fn select(&mut self, key: StructureKey, multi_select: bool) -> Result<InteractionOutcome, EngineError> {
        let key = self.existing(key)?;
        if self.is_selected(key) || self.is_locked(key) {
            debug!(?key, "Selection ignored for selected or locked structure.");
            return Ok(InteractionOutcome::Ignored);
        }

        let mut selection = if multi_select {
            self.selected.clone()
        } else {
            HashSet::new()
        };
        selection.insert(key);
        self.commit_selection(selection, HashMap::new())
    }

    fn deselect(&mut self, key: StructureKey) -> Result<InteractionOutcome, EngineError> {
        let key = self.existing(key)?;
        if !self.is_selected(key) {
            return Ok(InteractionOutcome::Ignored);
        }
        let mut selection = self.selected.clone();
        selection.remove(&key);
        self.commit_selection(selection, HashMap::new())
    }

    /// Applies `op` to a copy of every selected unlocked structure and commits only if
    /// all of them succeed. Scores are refreshed when the orientation changed.
    fn transform_selection<F>(&mut self, rescore: bool, op: F) -> Result<InteractionOutcome, EngineError>
    where
        F: Fn(&mut Structure) -> Result<(), TransformError>,
    {
        let targets: Vec<StructureKey> = self
            .selection()
            .into_iter()
            .filter(|&key| !self.is_locked(key))
            .collect();
        if targets.is_empty() {
            return Ok(InteractionOutcome::Ignored);
        }

        let mut staged = HashMap::with_capacity(targets.len());
        for key in targets {
            if let Some(structure) = self.structures.get(key) {
                let mut updated = structure.clone();
                op(&mut updated).map_err(|source| self.transform_error(Some(structure), source))?;
                staged.insert(key, updated);
            }
        }

        if rescore {
            self.commit_selection(self.selected.clone(), staged)
        } else {
            let affected = staged.len();
            self.commit_structures(staged);
            Ok(InteractionOutcome::Applied { affected })
        }
    }

    fn commit_selection(
        &mut self,
        selection: HashSet<StructureKey>,
        staged: HashMap<StructureKey, Structure>,
    ) -> Result<InteractionOutcome, EngineError> {
        let scores = self.compute_scores(&selection, &staged, None)?;
        let affected = staged.len().max(1);

        self.selected = selection;
        self.commit_structures(staged);
        self.scores = scores;
        info!(
            selected = self.selected.len(),
            lists = self.scores.len(),
            "Quick scores refreshed."
        );
        Ok(InteractionOutcome::Applied { affected })
    }

    fn commit_structures(&mut self, staged: HashMap<StructureKey, Structure>) {
        for (key, structure) in staged {
            if let Some(slot) = self.structures.get_mut(key) {
                *slot = structure;
            }
        }
    }

    fn compute_scores(
        &self,
        selection: &HashSet<StructureKey>,
        staged: &HashMap<StructureKey, Structure>,
        removed: Option<StructureKey>,
    ) -> Result<Vec<Vec<PairScore>>, EngineError> {
        let view = |key: &StructureKey| {
            if removed == Some(*key) {
                return None;
            }
            staged.get(key).or_else(|| self.structures.get(*key))
        };

        let all: Vec<&Structure> = self.order.iter().filter_map(view).collect();
        let selected: Vec<&Structure> = self.ordered(selection).iter().filter_map(view).collect();
        quick_scores(&selected, &all)
    }

    fn ordered(&self, keys: &HashSet<StructureKey>) -> Vec<StructureKey> {
        self.order
            .iter()
            .copied()
            .filter(|key| keys.contains(key))
            .collect()
    }

    fn existing(&self, key: StructureKey) -> Result<StructureKey, EngineError> {
        if self.structures.contains_key(key) {
            Ok(key)
        } else {
            Err(EngineError::StructureNotFound(format!("{key:?}")))
        }
    }

    fn transform_error(&self, structure: Option<&Structure>, source: TransformError) -> EngineError {
        EngineError::Transform {
            structure_id: structure.map_or_else(|| "<selection>".to_string(), |s| s.id().to_string()),
            source,
        }
    }
}

fn applied_if(changed: bool, affected: usize) -> InteractionOutcome {
    if changed {
        InteractionOutcome::Applied { affected }
    } else {
        InteractionOutcome::Ignored
    }
}
