//! Allow-lists of filterable identifiers per entity.

use crate::query::column::{Column, JsonPath};
use bitflags::bitflags;
use filter_syntax::{CompareOp, Literal};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

bitflags! {
    /// Operations an identifier may take part in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Ops: u16 {
        const EQ = 1 << 0;
        const NE = 1 << 1;
        const LT = 1 << 2;
        const GT = 1 << 3;
        const LE = 1 << 4;
        const GE = 1 << 5;
        /// `ident in [list]`
        const IN = 1 << 6;
        /// `constant in ident`
        const ELEMENT_IN = 1 << 7;
        /// `ident.contains(constant)`
        const CONTAINS = 1 << 8;
        /// `size(ident) <op> constant`
        const SIZE = 1 << 9;
        /// `ident` alone as a predicate
        const STANDALONE = 1 << 10;

        const EQUALITY = Self::EQ.bits() | Self::NE.bits();
        const ORDERING = Self::EQUALITY.bits()
            | Self::LT.bits()
            | Self::GT.bits()
            | Self::LE.bits()
            | Self::GE.bits();
    }
}

impl From<CompareOp> for Ops {
    fn from(op: CompareOp) -> Self {
        match op {
            CompareOp::Equal => Ops::EQ,
            CompareOp::NotEqual => Ops::NE,
            CompareOp::LessThan => Ops::LT,
            CompareOp::GreaterThan => Ops::GT,
            CompareOp::LessOrEqual => Ops::LE,
            CompareOp::GreaterOrEqual => Ops::GE,
        }
    }
}

/// Semantic type of an identifier, checked against constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int,
    String,
    Bool,
    /// Keys that may be given as integers or strings.
    Any,
}

impl FieldType {
    pub fn accepts(&self, lit: &Literal) -> bool {
        matches!(
            (self, lit),
            (FieldType::Int, Literal::Int(_))
                | (FieldType::String, Literal::String(_))
                | (FieldType::Bool, Literal::Bool(_))
                | (FieldType::Any, Literal::Int(_) | Literal::String(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => write!(f, "int"),
            FieldType::String => write!(f, "string"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Any => write!(f, "int or string"),
        }
    }
}

/// How an identifier is stored, which decides the SQL it projects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A plain column compared as-is.
    Scalar,
    /// A column read as Unix epoch seconds.
    Timestamp,
    /// A text column matched by substring.
    Text,
    /// A boolean column.
    BoolColumn,
    /// A boolean inside a JSON document.
    JsonBool(JsonPath),
    /// A string array inside a JSON document.
    JsonList(JsonPath),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    pub kind: FieldKind,
    pub column: Column,
    pub ops: Ops,
}

impl Field {
    pub const fn new(
        name: &'static str,
        ty: FieldType,
        kind: FieldKind,
        column: Column,
        ops: Ops,
    ) -> Self {
        Field {
            name,
            ty,
            kind,
            column,
            ops,
        }
    }

    pub fn allows(&self, ops: Ops) -> bool {
        self.ops.contains(ops)
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Field(Field),
    Alias(&'static str),
}

/// The identifiers one entity exposes to filters.
#[derive(Debug, Clone)]
pub struct Catalog {
    entity: &'static str,
    entries: HashMap<&'static str, Entry>,
}

impl Catalog {
    pub fn new(entity: &'static str) -> Self {
        Catalog {
            entity,
            entries: HashMap::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.entries.insert(field.name, Entry::Field(field));
        self
    }

    /// Registers `alias` as another name for the field `target`.
    pub fn with_alias(mut self, alias: &'static str, target: &'static str) -> Self {
        self.entries.insert(alias, Entry::Alias(target));
        self
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Looks up an identifier, following an alias to its field.
    pub fn lookup(&self, name: &str) -> Option<&Field> {
        match self.entries.get(name)? {
            Entry::Field(field) => Some(field),
            Entry::Alias(target) => match self.entries.get(target)? {
                Entry::Field(field) => Some(field),
                Entry::Alias(_) => None,
            },
        }
    }

    /// Every identifier accepted by this catalog, aliases included, sorted.
    pub fn identifiers(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn memo() -> Self {
        const CONTENT: Column = Column::new("memo", "content");
        const PAYLOAD: Column = Column::new("memo", "payload");
        const TAGS: JsonPath = JsonPath::new(PAYLOAD, &["tags"]);

        let json_flag = |name: &'static str, path: &'static [&'static str]| {
            Field::new(
                name,
                FieldType::Bool,
                FieldKind::JsonBool(JsonPath::new(PAYLOAD, path)),
                PAYLOAD,
                Ops::STANDALONE.union(Ops::EQUALITY),
            )
        };

        Catalog::new("memo")
            .with_field(Field::new(
                "content",
                FieldType::String,
                FieldKind::Text,
                CONTENT,
                Ops::EQUALITY.union(Ops::CONTAINS),
            ))
            .with_field(Field::new(
                "creator_id",
                FieldType::Int,
                FieldKind::Scalar,
                Column::new("memo", "creator_id"),
                Ops::EQUALITY,
            ))
            .with_field(Field::new(
                "created_ts",
                FieldType::Int,
                FieldKind::Timestamp,
                Column::new("memo", "created_ts"),
                Ops::ORDERING,
            ))
            .with_field(Field::new(
                "updated_ts",
                FieldType::Int,
                FieldKind::Timestamp,
                Column::new("memo", "updated_ts"),
                Ops::ORDERING,
            ))
            .with_alias("create_time", "created_ts")
            .with_alias("update_time", "updated_ts")
            .with_field(Field::new(
                "visibility",
                FieldType::String,
                FieldKind::Scalar,
                Column::new("memo", "visibility"),
                Ops::EQUALITY.union(Ops::IN),
            ))
            .with_field(Field::new(
                "pinned",
                FieldType::Bool,
                FieldKind::BoolColumn,
                Column::new("memo", "pinned"),
                Ops::STANDALONE,
            ))
            .with_field(Field::new(
                "tag",
                FieldType::String,
                FieldKind::JsonList(TAGS),
                PAYLOAD,
                Ops::IN,
            ))
            .with_field(Field::new(
                "tags",
                FieldType::String,
                FieldKind::JsonList(TAGS),
                PAYLOAD,
                Ops::ELEMENT_IN.union(Ops::SIZE),
            ))
            .with_field(json_flag("has_task_list", &["property", "hasTaskList"]))
            .with_field(json_flag("has_link", &["property", "hasLink"]))
            .with_field(json_flag("has_code", &["property", "hasCode"]))
            .with_field(json_flag(
                "has_incomplete_tasks",
                &["property", "hasIncompleteTasks"],
            ))
    }

    pub fn attachment() -> Self {
        Catalog::new("attachment")
            .with_field(Field::new(
                "memo_id",
                FieldType::Any,
                FieldKind::Scalar,
                Column::new("attachment", "memo_id"),
                Ops::IN.union(Ops::EQUALITY),
            ))
            .with_field(Field::new(
                "filename",
                FieldType::String,
                FieldKind::Text,
                Column::new("attachment", "filename"),
                Ops::CONTAINS,
            ))
            .with_field(Field::new(
                "mime_type",
                FieldType::String,
                FieldKind::Scalar,
                Column::new("attachment", "type"),
                Ops::EQUALITY,
            ))
            .with_field(Field::new(
                "create_time",
                FieldType::Int,
                FieldKind::Timestamp,
                Column::new("attachment", "created_ts"),
                Ops::ORDERING,
            ))
    }
}

lazy_static! {
    static ref MEMO_CATALOG: Catalog = Catalog::memo();
    static ref ATTACHMENT_CATALOG: Catalog = Catalog::attachment();
}

/// Entities that can be filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Memo,
    Attachment,
}

impl Entity {
    /// The shared catalog for this entity.
    pub fn catalog(&self) -> &'static Catalog {
        match self {
            Entity::Memo => &MEMO_CATALOG,
            Entity::Attachment => &ATTACHMENT_CATALOG,
        }
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memo" => Ok(Entity::Memo),
            "attachment" => Ok(Entity::Attachment),
            other => Err(format!("Unknown filter entity: {other}")),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Memo => write!(f, "memo"),
            Entity::Attachment => write!(f, "attachment"),
        }
    }
}
