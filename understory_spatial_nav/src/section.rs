// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sections and the registry that owns them.
//!
//! A [`Section`] is a named group of elements with its own navigation policy.
//! The [`SectionRegistry`] keeps sections in registration order, which is the
//! order used whenever no explicit section is named (membership lookup, entry
//! fallback, candidate gathering).
//!
//! Besides configuration, a section carries two pieces of navigation history
//! written by the navigator: the last element focused inside it, and the most
//! recent transition out of it (for [`GlobalConfig::remember_source`]).

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use tracing::debug;
use understory_focus::Remembered;

use crate::FocusHost;
use crate::config::{EffectivePolicy, GlobalConfig, SectionConfig};
use crate::error::Error;

const ID_POOL_PREFIX: &str = "section-";

/// Unique section identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(String);

impl SectionId {
    /// Wrap a string id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A registered section.
#[derive(Clone, Debug)]
pub struct Section<E> {
    id: SectionId,
    config: SectionConfig<E>,
    last_focused: Option<E>,
    previous: Option<Remembered<E>>,
}

impl<E: Copy> Section<E> {
    fn new(id: SectionId, config: SectionConfig<E>) -> Self {
        Self {
            id,
            config,
            last_focused: None,
            previous: None,
        }
    }

    /// The section id.
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// The stored configuration overrides.
    #[must_use]
    pub fn config(&self) -> &SectionConfig<E> {
        &self.config
    }

    /// Whether the section is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.config.disabled.unwrap_or(false)
    }

    /// The element most recently focused inside this section.
    ///
    /// This is a plain record; it may no longer be navigable.
    #[must_use]
    pub fn last_focused(&self) -> Option<E> {
        self.last_focused
    }

    /// The most recent transition out of this section.
    #[must_use]
    pub fn previous(&self) -> Option<Remembered<E>> {
        self.previous
    }
}

/// Sections by id, in registration order, plus the global policy.
pub struct SectionRegistry<E> {
    sections: HashMap<SectionId, Section<E>>,
    order: Vec<SectionId>,
    global: GlobalConfig<E>,
    default_section: Option<SectionId>,
    last_section: Option<SectionId>,
    id_pool: u64,
}

impl<E> Default for SectionRegistry<E> {
    fn default() -> Self {
        Self {
            sections: HashMap::new(),
            order: Vec::new(),
            global: GlobalConfig::default(),
            default_section: None,
            last_section: None,
            id_pool: 0,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for SectionRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionRegistry")
            .field("sections", &self.order)
            .field("global", &self.global)
            .field("default_section", &self.default_section)
            .field("last_section", &self.last_section)
            .field("id_pool", &self.id_pool)
            .finish_non_exhaustive()
    }
}

impl<E: Copy + Eq> SectionRegistry<E> {
    /// An empty registry with default global policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section under a generated `section-N` id.
    pub fn add(&mut self, config: SectionConfig<E>) -> SectionId {
        let id = loop {
            self.id_pool += 1;
            let candidate = SectionId(format!("{ID_POOL_PREFIX}{}", self.id_pool));
            if !self.sections.contains_key(&candidate) {
                break candidate;
            }
        };
        self.insert(id.clone(), config);
        id
    }

    /// Register a section under an explicit id.
    pub fn add_with_id(
        &mut self,
        id: impl Into<SectionId>,
        config: SectionConfig<E>,
    ) -> Result<SectionId, Error> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::MissingSectionId);
        }
        if self.sections.contains_key(&id) {
            return Err(Error::DuplicateSection(id));
        }
        self.insert(id.clone(), config);
        Ok(id)
    }

    fn insert(&mut self, id: SectionId, config: SectionConfig<E>) {
        debug!(section = %id, "section added");
        self.order.push(id.clone());
        self.sections.insert(id.clone(), Section::new(id, config));
    }

    /// Unregister a section.
    ///
    /// Clears the last-used and default section references if they pointed at it.
    pub fn remove(&mut self, id: &SectionId) -> Result<Section<E>, Error> {
        if id.is_empty() {
            return Err(Error::MissingSectionId);
        }
        let section = self
            .sections
            .remove(id)
            .ok_or_else(|| Error::UnknownSection(id.clone()))?;
        self.order.retain(|s| s != id);
        if self.last_section.as_ref() == Some(id) {
            self.last_section = None;
        }
        if self.default_section.as_ref() == Some(id) {
            self.default_section = None;
        }
        debug!(section = %id, "section removed");
        Ok(section)
    }

    /// Re-enable a disabled section.
    pub fn enable(&mut self, id: &SectionId) -> Result<(), Error> {
        self.section_mut(id)?.config.disabled = Some(false);
        Ok(())
    }

    /// Disable a section; it contributes no candidates until re-enabled.
    pub fn disable(&mut self, id: &SectionId) -> Result<(), Error> {
        self.section_mut(id)?.config.disabled = Some(true);
        Ok(())
    }

    /// Update the global policy with the policy fields of `patch`.
    pub fn set_global(&mut self, patch: SectionConfig<E>) {
        debug!("global policy updated");
        self.global.apply(patch);
    }

    /// Update a section's configuration with the `Some` fields of `patch`.
    pub fn set_section(&mut self, id: &SectionId, patch: SectionConfig<E>) -> Result<(), Error> {
        self.section_mut(id)?.config.merge(patch);
        debug!(section = %id, "section policy updated");
        Ok(())
    }

    /// Set or clear the section entered when no section is named.
    pub fn set_default_section(&mut self, id: Option<&SectionId>) -> Result<(), Error> {
        match id {
            None => self.default_section = None,
            Some(id) if id.is_empty() => self.default_section = None,
            Some(id) if !self.sections.contains_key(id) => {
                return Err(Error::UnknownSection(id.clone()));
            }
            Some(id) => self.default_section = Some(id.clone()),
        }
        Ok(())
    }

    /// The default section, if set.
    #[must_use]
    pub fn default_section(&self) -> Option<&SectionId> {
        self.default_section.as_ref()
    }

    /// The section that most recently received focus.
    #[must_use]
    pub fn last_section(&self) -> Option<&SectionId> {
        self.last_section.as_ref()
    }

    /// Remove every section. The global policy and the id counter are kept.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.order.clear();
        self.default_section = None;
        self.last_section = None;
    }

    /// Number of registered sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no section is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &SectionId) -> bool {
        self.sections.contains_key(id)
    }

    /// Section ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &SectionId> + '_ {
        self.order.iter()
    }

    /// Look up a section.
    #[must_use]
    pub fn get(&self, id: &SectionId) -> Option<&Section<E>> {
        self.sections.get(id)
    }

    /// The global policy.
    #[must_use]
    pub fn global(&self) -> &GlobalConfig<E> {
        &self.global
    }

    fn section_mut(&mut self, id: &SectionId) -> Result<&mut Section<E>, Error> {
        self.sections
            .get_mut(id)
            .ok_or_else(|| Error::UnknownSection(id.clone()))
    }

    fn enabled(&self, id: &SectionId) -> Option<&Section<E>> {
        self.sections.get(id).filter(|s| !s.is_disabled())
    }

    pub(crate) fn record_focus(&mut self, element: E, id: &SectionId) {
        if let Some(section) = self.sections.get_mut(id) {
            section.last_focused = Some(element);
            self.last_section = Some(id.clone());
        }
    }

    pub(crate) fn record_previous(&mut self, id: &SectionId, previous: Remembered<E>) {
        if let Some(section) = self.sections.get_mut(id) {
            section.previous = Some(previous);
        }
    }

    /// The section's policy merged over the global policy.
    #[must_use]
    pub fn effective_policy(&self, id: &SectionId) -> Option<EffectivePolicy<E>> {
        self.sections.get(id).map(|s| s.config.resolve(&self.global))
    }

    /// Whether `element` may receive focus as a member of section `id`.
    ///
    /// Fails for a missing or disabled section, an element without area, an
    /// element marked disabled, a non-member when `verify_membership` is set,
    /// or an element rejected by the effective navigable filter.
    pub fn is_navigable<H>(
        &self,
        host: &H,
        element: E,
        id: &SectionId,
        verify_membership: bool,
    ) -> bool
    where
        H: FocusHost<Element = E>,
    {
        let Some(section) = self.enabled(id) else {
            return false;
        };
        let Some(rect) = host.rect(element) else {
            return false;
        };
        if (rect.width() <= 0.0 && rect.height() <= 0.0) || host.is_disabled(element) {
            return false;
        }
        if verify_membership
            && !section
                .config
                .selector
                .as_ref()
                .is_some_and(|sel| sel.matches(host, element))
        {
            return false;
        }
        let filter = section
            .config
            .navigable_filter
            .as_ref()
            .or(self.global.navigable_filter.as_ref());
        filter.is_none_or(|f| f(&element, id))
    }

    /// The first enabled section, in registration order, whose selector matches `element`.
    pub fn section_of<H>(&self, host: &H, element: E) -> Option<SectionId>
    where
        H: FocusHost<Element = E>,
    {
        self.order
            .iter()
            .filter_map(|id| self.enabled(id))
            .find(|s| {
                s.config
                    .selector
                    .as_ref()
                    .is_some_and(|sel| sel.matches(host, element))
            })
            .map(|s| s.id.clone())
    }

    /// Navigable elements of section `id`, in selector order.
    pub fn navigable_elements<H>(&self, host: &H, id: &SectionId) -> Vec<E>
    where
        H: FocusHost<Element = E>,
    {
        let Some(selector) = self.sections.get(id).and_then(|s| s.config.selector.as_ref())
        else {
            return Vec::new();
        };
        selector
            .resolve(host)
            .into_iter()
            .filter(|&e| self.is_navigable(host, e, id, false))
            .collect()
    }

    /// The section's default element, if configured and navigable.
    pub fn default_element<H>(&self, host: &H, id: &SectionId) -> Option<E>
    where
        H: FocusHost<Element = E>,
    {
        let section = self.sections.get(id)?;
        let selector = section
            .config
            .default_element
            .as_ref()
            .or(self.global.default_element.as_ref())?;
        selector
            .first(host)
            .filter(|&e| self.is_navigable(host, e, id, true))
    }

    /// The section's last focused element, if still navigable.
    pub fn last_focused_element<H>(&self, host: &H, id: &SectionId) -> Option<E>
    where
        H: FocusHost<Element = E>,
    {
        self.sections
            .get(id)?
            .last_focused
            .filter(|&e| self.is_navigable(host, e, id, true))
    }
}
