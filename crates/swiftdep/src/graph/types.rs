//! Node and label vocabulary shared by the builder, the analyzer and the exporters.

use serde::{Deserialize, Serialize};

/// Prefix marking an Objective-C `@import Module;` reference.
pub const OBJC_MODULE_PREFIX: &str = "@module:";

/// Prefix marking a Swift `import Module` reference.
pub const SWIFT_MODULE_PREFIX: &str = "module:";

/// Label attached to edges created from a local `#import`/`#include`.
pub const IMPORT_LABEL: &str = "<import>";

/// Label attached to edges pointing at an external module.
pub const MODULE_IMPORT_LABEL: &str = "<module-import>";

/// What a graph node stands for.
///
/// Nodes are identified by strings: project-relative file paths, or module markers
/// carrying one of the two module prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A project source file
    File,
    /// A framework pulled in with Objective-C `@import`
    ObjcModule,
    /// A module pulled in with Swift `import`
    SwiftModule,
}

impl NodeKind {
    /// Classify a node name by its prefix.
    pub fn of(node: &str) -> Self {
        if node.starts_with(OBJC_MODULE_PREFIX) {
            NodeKind::ObjcModule
        } else if node.starts_with(SWIFT_MODULE_PREFIX) {
            NodeKind::SwiftModule
        } else {
            NodeKind::File
        }
    }

    /// True for both module flavours.
    pub fn is_module(self) -> bool {
        !matches!(self, NodeKind::File)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::File => write!(f, "File"),
            NodeKind::ObjcModule => write!(f, "ObjcModule"),
            NodeKind::SwiftModule => write!(f, "SwiftModule"),
        }
    }
}

/// Shorthand for `NodeKind::of(node).is_module()`.
pub fn is_module(node: &str) -> bool {
    NodeKind::of(node).is_module()
}

/// Sentinel labels (`<import>`, `<module-import>`) carry no symbol information.
pub fn is_sentinel_label(label: &str) -> bool {
    label.starts_with('<')
}
