//! Interactive state and action dispatch.
//!
//! Views only describe actions; the session decides what they do and
//! keeps presentation state (query, collapsed sections, open modal,
//! expanded texts, copy feedback) out of the catalog.

use std::collections::BTreeSet;

use crate::clipboard::Clipboard;
use crate::config::Settings;
use crate::store::CatalogStore;
use crate::tree::{Action, Node, Section, TextId};
use crate::view::{catalog_page, pack_detail, server_detail};

/// Which detail view is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Pack { name: String },
    Server { name: String, pack: String },
}

/// Input events a front end feeds into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// New contents of the search box.
    Input(String),
    Activate(Action),
    /// Escape / cancel key.
    Escape,
    /// Click outside an open modal.
    OutsideClick,
}

/// Transient result of a copy, shown on the button until the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn label(self) -> &'static str {
        match self {
            CopyOutcome::Copied => "Copied!",
            CopyOutcome::Failed => "Failed",
        }
    }
}

pub struct Session<'a> {
    store: &'a CatalogStore,
    settings: &'a Settings,
    query: String,
    collapsed: BTreeSet<Section>,
    modal: Option<Modal>,
    expanded: BTreeSet<TextId>,
    copy_feedback: Option<(String, CopyOutcome)>,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a CatalogStore, settings: &'a Settings) -> Self {
        Self {
            store,
            settings,
            query: String::new(),
            collapsed: BTreeSet::new(),
            modal: None,
            expanded: BTreeSet::new(),
            copy_feedback: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn expanded(&self) -> &BTreeSet<TextId> {
        &self.expanded
    }

    pub fn is_collapsed(&self, section: Section) -> bool {
        self.collapsed.contains(&section)
    }

    pub fn copy_feedback(&self) -> Option<CopyOutcome> {
        self.copy_feedback.as_ref().map(|(_, outcome)| *outcome)
    }

    pub fn handle(&mut self, event: Event, clipboard: &mut dyn Clipboard) {
        self.copy_feedback = None;
        match event {
            Event::Input(text) => self.query = text,
            Event::Escape => self.modal = None,
            Event::OutsideClick => self.modal = None,
            Event::Activate(action) => self.activate(action, clipboard),
        }
    }

    fn activate(&mut self, action: Action, clipboard: &mut dyn Clipboard) {
        match action {
            Action::OpenPack { name } => {
                if self.store.find_pack(&name).is_some() {
                    self.modal = Some(Modal::Pack { name });
                }
            }
            Action::OpenServer { name, pack } => {
                if self.store.find_server(&name, &pack).is_some() {
                    self.modal = Some(Modal::Server { name, pack });
                }
            }
            Action::CloseModal => self.modal = None,
            Action::ToggleSection { section } => {
                if !self.collapsed.remove(&section) {
                    self.collapsed.insert(section);
                }
            }
            Action::Expand { id } => {
                self.expanded.insert(id);
            }
            Action::Collapse { id } => {
                self.expanded.remove(&id);
            }
            Action::Copy { text } => {
                let outcome = match clipboard.write_text(&text) {
                    Ok(()) => CopyOutcome::Copied,
                    Err(e) => {
                        tracing::warn!(error = %e, "copy failed");
                        CopyOutcome::Failed
                    }
                };
                self.copy_feedback = Some((text, outcome));
            }
        }
    }

    /// Current screen: the open modal, or the catalog page for the query.
    pub fn view(&self) -> Node {
        let mut node = self
            .modal
            .as_ref()
            .and_then(|m| match m {
                Modal::Pack { name } => pack_detail(self.store, self.settings, name),
                Modal::Server { name, pack } => server_detail(self.store, self.settings, name, pack),
            })
            .unwrap_or_else(|| catalog_page(self.store, &self.query, &self.collapsed));

        if let Some((text, outcome)) = &self.copy_feedback {
            relabel_copy_button(&mut node, text, outcome.label());
        }
        node
    }
}

fn relabel_copy_button(node: &mut Node, copied: &str, label: &str) {
    match node {
        Node::Button {
            label: current,
            action: Action::Copy { text },
        } if text.as_str() == copied => *current = label.to_string(),
        Node::Heading { children, .. } | Node::Container { children, .. } => {
            for child in children {
                relabel_copy_button(child, copied, label);
            }
        }
        Node::Expandable {
            collapsed,
            expanded,
            ..
        } => {
            for child in collapsed.iter_mut().chain(expanded.iter_mut()) {
                relabel_copy_button(child, copied, label);
            }
        }
        _ => {}
    }
}
