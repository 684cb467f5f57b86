//! # Assembly Output
//!
//! The emitter appends records to an [`OutputCollector`]. [`Assembly`] is the
//! in-memory collector: it keeps the text items (instructions, labels,
//! comments, literal code) in call order and the data members in a separate
//! table, and renders both as a GNU-as style listing.
//!
//! ```text
//! .data
//! counter: .word 0
//!
//! .text
//! .global main
//! main:
//!     PUSH {R4, LR}
//!     ...
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AsmError;
use crate::instruction::Instruction;

/// Append-only sink for emitted records.
///
/// Implementors take ownership of everything handed to them and are never
/// read back by the emitter.
pub trait OutputCollector {
    fn append(&mut self, instruction: Instruction);

    fn add_data_member(&mut self, member: DataMember);

    fn add_label(&mut self, name: String, is_global: bool);

    fn add_comment(&mut self, text: String);

    /// Raw assembler text written to the listing unchanged.
    fn add_literal(&mut self, code: String);
}

/// One entry of the text section, in emission order.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum OutputItem {
    Instruction(Instruction),
    Label { name: String, is_global: bool },
    Comment(String),
    Literal(String),
}

/// Initial contents of a data member.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum DataValue {
    /// A single 32-bit word.
    Word(u32),

    /// A NUL-terminated string.
    Text(String),

    /// Raw bytes.
    Bytes(Vec<u8>),

    /// `element_count` elements of `size` bytes each, all set to `value`.
    Fill {
        element_count: u32,
        size: String,
        value: String,
    },
}

/// A named entry of the data section.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct DataMember {
    pub name: String,
    pub value: DataValue,
}

impl DataMember {
    #[must_use]
    pub fn new(name: impl Into<String>, value: DataValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl std::fmt::Display for DataMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = &self.name;
        match &self.value {
            DataValue::Word(value) => write!(f, "{name}: .word {value}"),
            DataValue::Text(text) => write!(f, "{name}: .asciz \"{}\"", GasString(text)),
            DataValue::Bytes(bytes) => {
                let bytes = bytes
                    .iter()
                    .map(|b| format!("0x{b:02X}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{name}: .byte {bytes}")
            }
            DataValue::Fill {
                element_count,
                size,
                value,
            } => write!(f, "{name}: .fill {element_count}, {size}, {value}"),
        }
    }
}

/// String body in GNU as escape syntax.
///
/// Printable ASCII is written as is; anything else becomes a named escape or
/// a three-digit octal escape per byte.
struct GasString<'a>(&'a str);

impl std::fmt::Display for GasString<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0.bytes() {
            match byte {
                b'\\' => f.write_str("\\\\")?,
                b'"' => f.write_str("\\\"")?,
                b'\n' => f.write_str("\\n")?,
                b'\t' => f.write_str("\\t")?,
                b'\r' => f.write_str("\\r")?,
                0x20..=0x7E => write!(f, "{}", char::from(byte))?,
                _ => write!(f, "\\{byte:03o}")?,
            }
        }
        Ok(())
    }
}

/// In-memory assembly output.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Assembly {
    items: Vec<OutputItem>,
    data_members: Vec<DataMember>,
}

impl Assembly {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            data_members: Vec::new(),
        }
    }

    /// Text section entries in emission order.
    #[must_use]
    pub fn items(&self) -> &[OutputItem] {
        &self.items
    }

    /// Emitted instructions in emission order, without labels and comments.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.items.iter().filter_map(|item| match item {
            OutputItem::Instruction(instruction) => Some(instruction),
            _ => None,
        })
    }

    #[must_use]
    pub fn data_members(&self) -> &[DataMember] {
        &self.data_members
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.data_members.is_empty()
    }

    /// Validates every emitted instruction.
    ///
    /// # Errors
    ///
    /// Returns the first record that fails [`Instruction::validate`].
    pub fn validate(&self) -> Result<(), AsmError> {
        for instruction in self.instructions() {
            if let Err(e) = instruction.validate() {
                tracing::warn!("rejecting `{instruction}`: {e}");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Renders the assembly as listing text.
    ///
    /// # Errors
    ///
    /// Fails if any instruction does not validate; nothing is rendered then.
    pub fn listing(&self) -> Result<String, AsmError> {
        self.validate()?;

        let mut out = String::new();
        if !self.data_members.is_empty() {
            out.push_str(".data\n");
            for member in &self.data_members {
                out.push_str(&format!("{member}\n"));
            }
            out.push('\n');
        }

        out.push_str(".text\n");
        for item in &self.items {
            match item {
                OutputItem::Instruction(instruction) => {
                    out.push_str(&format!("    {instruction}\n"));
                }
                OutputItem::Label { name, is_global } => {
                    if *is_global {
                        out.push_str(&format!(".global {name}\n"));
                    }
                    out.push_str(&format!("{name}:\n"));
                }
                OutputItem::Comment(text) => {
                    // one `@` line per source line, a newline never ends the comment
                    for line in text.split('\n') {
                        let line = line.trim_end_matches('\r');
                        out.push_str(&format!("    @ {line}\n"));
                    }
                }
                OutputItem::Literal(code) => out.push_str(&format!("{code}\n")),
            }
        }

        Ok(out)
    }
}

impl OutputCollector for Assembly {
    fn append(&mut self, instruction: Instruction) {
        self.items.push(OutputItem::Instruction(instruction));
    }

    fn add_data_member(&mut self, member: DataMember) {
        tracing::trace!("data member `{}`", member.name);
        self.data_members.push(member);
    }

    fn add_label(&mut self, name: String, is_global: bool) {
        self.items.push(OutputItem::Label { name, is_global });
    }

    fn add_comment(&mut self, text: String) {
        self.items.push(OutputItem::Comment(text));
    }

    fn add_literal(&mut self, code: String) {
        self.items.push(OutputItem::Literal(code));
    }
}
