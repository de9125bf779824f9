//! In-memory folder tree over BIM360 folder resources.
//!
//! Nodes live in an arena indexed by [`NodeId`]; parent links are indices,
//! so a node's children always point back at it and the structure stays a
//! tree by construction. A hostile server could still present the same
//! folder id under two parents — the tree would then hold it twice, once
//! per parent, and each search still visits every node at most once.

use crate::client::ForgeClient;
use crate::error::Result;
use crate::models::ResourceObject;

/// Index of a node within its [`FolderTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    folder: ResourceObject,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A folder hierarchy rooted at one BIM360 folder.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: &forgeapi::ForgeClient, root: forgeapi::ResourceObject)
/// # -> forgeapi::Result<()> {
/// use forgeapi::FolderTree;
///
/// let mut tree = FolderTree::new(root);
/// tree.populate(client, "project-uuid").await?;
/// if let Some(plans) = tree.search("Plans") {
///     println!("found {}", tree.folder(plans).id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FolderTree {
    nodes: Vec<Node>,
}

impl FolderTree {
    /// Create a tree holding only the given root folder.
    pub fn new(root: ResourceObject) -> Self {
        Self {
            nodes: vec![Node {
                folder: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node's id.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The folder resource a node wraps.
    pub fn folder(&self, id: NodeId) -> &ResourceObject {
        &self.nodes[id.0].folder
    }

    /// A node's parent, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// A node's children, in the order the server listed them.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    fn attach(&mut self, parent: NodeId, folder: ResourceObject) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            folder,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Fetch the whole subtree below the root, depth-first.
    ///
    /// Issues one folder-contents request per folder node, strictly
    /// sequentially; the total call count equals the number of folders in
    /// the subtree.
    pub async fn populate(&mut self, client: &ForgeClient, project_id: &str) -> Result<()> {
        let folders_filter = vec!["folders".to_string()];
        let mut pending = vec![self.root()];

        while let Some(current) = pending.pop() {
            let folder_id = self.folder(current).id.clone();
            let (children, _versions) = client
                .folders()
                .get_folder_contents(project_id, &folder_id, &folders_filter)
                .await?;

            for child in children {
                let id = self.attach(current, child);
                pending.push(id);
            }
        }
        Ok(())
    }

    /// Find the first folder below the root named `name`, in pre-order.
    /// The root itself is never a match.
    pub fn search(&self, name: &str) -> Option<NodeId> {
        self.search_below(self.root(), name)
    }

    fn search_below(&self, id: NodeId, name: &str) -> Option<NodeId> {
        for &child in self.children(id) {
            if self.folder(child).name() == Some(name) {
                return Some(child);
            }
            if let Some(found) = self.search_below(child, name) {
                return Some(found);
            }
        }
        None
    }

    /// The id chain from the root down to `id`, inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}
