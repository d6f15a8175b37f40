//! Conventional CRUD routes generated from a single controller.
//!
//! | member  | verb   | path                       |
//! |---------|--------|----------------------------|
//! | index   | GET    | `{prefix}`                 |
//! | create  | POST   | `{prefix}/create`          |
//! | store   | POST   | `{prefix}`                 |
//! | show    | GET    | `{prefix}/:{id}`           |
//! | edit    | GET    | `{prefix}/:{id}/edit`      |
//! | update  | PATCH  | `{prefix}/:{id}`           |
//! | destroy | DELETE | `{prefix}/:{id}`           |
//!
//! Only the members the controller actually exposes are registered.

use crate::path::{self, SEPARATOR};
use crate::route::Verb;

/// The id parameter used when the resource sits at the root.
pub const DEFAULT_ID_PARAM: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Collection,
    Create,
    Member,
    MemberEdit,
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceAction {
    member: &'static str,
    verb: Verb,
    shape: Shape,
}

pub const RESOURCE_ACTIONS: [ResourceAction; 7] = [
    ResourceAction { member: "index", verb: Verb::Get, shape: Shape::Collection },
    ResourceAction { member: "create", verb: Verb::Post, shape: Shape::Create },
    ResourceAction { member: "store", verb: Verb::Post, shape: Shape::Collection },
    ResourceAction { member: "show", verb: Verb::Get, shape: Shape::Member },
    ResourceAction { member: "edit", verb: Verb::Get, shape: Shape::MemberEdit },
    ResourceAction { member: "update", verb: Verb::Patch, shape: Shape::Member },
    ResourceAction { member: "destroy", verb: Verb::Delete, shape: Shape::Member },
];

impl ResourceAction {
    pub fn member(&self) -> &'static str {
        self.member
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The route path for this action under `prefix`, separators collapsed.
    pub fn path(&self, prefix: &str, id_param: &str) -> String {
        let path = match self.shape {
            Shape::Collection => prefix.to_owned(),
            Shape::Create => format!("{prefix}/create"),
            Shape::Member => format!("{prefix}/:{id_param}"),
            Shape::MemberEdit => format!("{prefix}/:{id_param}/edit"),
        };
        path::collapse_separators(&path)
    }

    /// The route-specific alias, e.g. `album.show`.
    pub fn alias(&self, prefix: &str) -> String {
        format!("{}.{}", path::trim(prefix), self.member)
    }
}

/// Derives the id parameter name from a resource prefix.
///
/// `/album/:id/photo` becomes `album_id_photo_id`; a prefix that is empty once separators are
/// trimmed yields [`DEFAULT_ID_PARAM`].
pub fn id_param(prefix: &str) -> String {
    let trimmed = path::trim(prefix);
    if trimmed.is_empty() {
        return DEFAULT_ID_PARAM.to_owned();
    }

    let segments = trimmed.split(SEPARATOR).map(|segment| segment.trim_start_matches(':')).collect::<Vec<_>>();
    format!("{}_{DEFAULT_ID_PARAM}", segments.join("_"))
}
