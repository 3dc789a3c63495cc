//! Registry of mounted render roots, keyed by container id.

use crate::tree::RenderTree;
use std::collections::BTreeMap;

/// A live render target inside one container.
pub trait RenderRoot {
    /// Draw `tree`, replacing whatever the root showed before.
    fn render(&mut self, tree: &RenderTree);

    /// Clear the container and release the root.
    fn unmount(&mut self);
}

/// The live association between a container and what is rendered in it.
#[derive(Debug)]
pub struct MountHandle<R> {
    pub container_id: String,
    pub root: R,
    pub tree: RenderTree,
    pub renders: usize,
}

/// At most one [`MountHandle`] per container id.
#[derive(Debug)]
pub struct MountRegistry<R: RenderRoot> {
    handles: BTreeMap<String, MountHandle<R>>,
}

impl<R: RenderRoot> Default for MountRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RenderRoot> MountRegistry<R> {
    pub fn new() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }

    /// Render `tree` into `root` and track it under `container_id`.
    ///
    /// Returns `false` without touching `root` if the container already has
    /// a live handle.
    pub fn mount(&mut self, container_id: &str, mut root: R, tree: RenderTree) -> bool {
        if self.handles.contains_key(container_id) {
            log::debug!("[MFW] {} already mounted, skipping", container_id);
            return false;
        }
        root.render(&tree);
        self.handles.insert(
            container_id.to_string(),
            MountHandle {
                container_id: container_id.to_string(),
                root,
                tree,
                renders: 1,
            },
        );
        true
    }

    /// Replace the tree of an existing handle. Returns `false` if the
    /// container is not mounted.
    pub fn rerender(&mut self, container_id: &str, tree: RenderTree) -> bool {
        match self.handles.get_mut(container_id) {
            Some(handle) => {
                handle.root.render(&tree);
                handle.tree = tree;
                handle.renders += 1;
                true
            }
            None => false,
        }
    }

    pub fn unmount(&mut self, container_id: &str) -> bool {
        match self.handles.remove(container_id) {
            Some(mut handle) => {
                handle.root.unmount();
                true
            }
            None => false,
        }
    }

    /// Release every handle, returning how many were mounted.
    pub fn unmount_all(&mut self) -> usize {
        let handles = std::mem::take(&mut self.handles);
        let count = handles.len();
        for (_, mut handle) in handles {
            handle.root.unmount();
        }
        count
    }

    pub fn contains(&self, container_id: &str) -> bool {
        self.handles.contains_key(container_id)
    }

    pub fn get(&self, container_id: &str) -> Option<&MountHandle<R>> {
        self.handles.get(container_id)
    }

    pub fn current_tree(&self, container_id: &str) -> Option<&RenderTree> {
        self.handles.get(container_id).map(|h| &h.tree)
    }

    pub fn ids(&self) -> Vec<String> {
        self.handles.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
