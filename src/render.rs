//! HTML rendering of block descriptions.
//!
//! The markup follows the page layout: each block is an `li.interv-li` holding a row with the
//! multi-select and space checklist in the first column and the numeric inputs and the delete
//! button in the last one. Rendering is done through `Display`, so a block or a whole form can be
//! written with `write!` or turned into a `String` with `to_string()`.

use std::fmt::{self, Display, Formatter};

use crate::form::FormState;
use crate::view::{BlockView, InterventionSelect, NumberInput, SpaceChecklist};

/// Id of the list that holds the blocks.
pub const CONTAINER_ID: &str = "interv";

/// Escapes text for use in element content and double-quoted attribute values.
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

impl Display for InterventionSelect {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(
            f,
            r#"<select id="{}" class="li-interv-select" multiple>"#,
            Escaped(&self.id)
        )?;
        for option in &self.options {
            let selected = if option.selected { " selected" } else { "" };
            writeln!(
                f,
                r#"<option value="{}"{selected}>{}</option>"#,
                option.value.code(),
                Escaped(option.label)
            )?;
        }
        writeln!(f, "</select>")
    }
}

impl Display for SpaceChecklist {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let style = if self.visible {
            ""
        } else {
            r#" style="display: none""#
        };
        writeln!(f, r#"<div id="{}"{style}>"#, Escaped(&self.container_id))?;
        writeln!(
            f,
            r#"<label for="{}">{}</label>"#,
            Escaped(&self.list_id),
            Escaped(self.label)
        )?;
        writeln!(f, r#"<ul id="{}" class="checkboxes">"#, Escaped(&self.list_id))?;
        for checkbox in &self.checkboxes {
            let checked = if checkbox.checked { " checked" } else { "" };
            writeln!(
                f,
                r#"<li><input id="{id}" type="checkbox" value="{}" name="{}"{checked}><label for="{id}">{}</label></li>"#,
                checkbox.value.code(),
                Escaped(checkbox.name),
                Escaped(checkbox.label),
                id = Escaped(&checkbox.id),
            )?;
        }
        writeln!(f, "</ul>")?;
        writeln!(f, "</div>")
    }
}

impl Display for NumberInput {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(
            f,
            r#"<label for="{}">{}</label>"#,
            Escaped(&self.id),
            Escaped(self.label)
        )?;
        write!(
            f,
            r#"<input id="{}" class="li-interv-time" type="number""#,
            Escaped(&self.id)
        )?;
        if let Some(min) = self.min {
            write!(f, r#" min="{}""#, Escaped(min))?;
        }
        if let Some(max) = self.max {
            write!(f, r#" max="{}""#, Escaped(max))?;
        }
        write!(f, r#" step="{}""#, Escaped(self.step))?;
        if let Some(value) = &self.value {
            write!(f, r#" value="{}""#, Escaped(value))?;
        }
        writeln!(f, ">")
    }
}

impl Display for BlockView {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, r#"<li id="{}" class="interv-li">"#, self.item_id)?;
        writeln!(f, r#"<div class="li-interv-div row">"#)?;

        writeln!(f, r#"<div class="col-5">"#)?;
        write!(f, "{}", self.select)?;
        write!(f, "{}", self.spaces)?;
        writeln!(f, "</div>")?;

        writeln!(f, r#"<div class="col-2"></div>"#)?;

        writeln!(f, r#"<div class="col-5">"#)?;
        write!(f, "{}", self.compliance)?;
        writeln!(f, "<br><br>")?;
        write!(f, "{}", self.duration)?;
        writeln!(
            f,
            r#"<button type="button" class="btn btn-sm btn-danger" data-block="{}"><i class="fas fa-2x fa-times-circle"></i>{}</button>"#,
            self.delete.target,
            Escaped(self.delete.label)
        )?;
        writeln!(f, "</div>")?;

        writeln!(f, "<hr>")?;
        writeln!(f, "</div>")?;
        writeln!(f, "</li>")
    }
}

impl Display for FormState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, r#"<ul id="{CONTAINER_ID}">"#)?;
        for block in self.blocks() {
            write!(f, "{block}")?;
        }
        writeln!(f, "</ul>")
    }
}
