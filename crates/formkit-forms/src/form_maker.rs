//! Layout of a form's fields.
//!
//! [`FormMaker`] renders resolved fields through a [`FieldBuilder`], grouped
//! into sections and optionally into grid columns, and collects the page
//! assets the rendered fields require.

use formkit_core::settings::keys;
use formkit_core::utils::text::escape_html;
use formkit_core::ConfigLookup;
use formkit_fields::FieldConfig;

use crate::assets::FormAssets;
use crate::builder::{FieldBuilder, Orientation};
use crate::session::Session;

/// A titled (or untitled) group of fields, listed by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: Option<String>,
    pub fields: Vec<String>,
}

impl Section {
    /// Creates a titled section.
    pub fn new<I, S>(title: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: Some(title.into()),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a section without a header.
    pub fn untitled<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Renders fields into sections and columns.
#[derive(Debug, Clone)]
pub struct FormMaker {
    orientation: Orientation,
    with_js_validation: bool,
    form_js: Option<String>,
    sections: Vec<Section>,
    columns: usize,
    assets: FormAssets,
}

impl Default for FormMaker {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            with_js_validation: false,
            form_js: None,
            sections: Vec::new(),
            columns: 1,
            assets: FormAssets::new(),
        }
    }
}

impl FormMaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.orientation = orientation;
        self
    }

    pub fn set_js_validation(&mut self, enabled: bool) -> &mut Self {
        self.with_js_validation = enabled;
        self
    }

    pub fn set_form_js(&mut self, js: impl Into<String>) -> &mut Self {
        self.form_js = Some(js.into());
        self
    }

    /// Sets the sections. An empty list renders every field in order.
    pub fn set_sections(&mut self, sections: Vec<Section>) -> &mut Self {
        self.sections = sections;
        self
    }

    /// Sets the number of grid columns; values below 1 count as 1.
    pub fn set_columns(&mut self, columns: usize) -> &mut Self {
        self.columns = columns.max(1);
        self
    }

    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub const fn with_js_validation(&self) -> bool {
        self.with_js_validation
    }

    pub fn form_js(&self) -> Option<&str> {
        self.form_js.as_deref()
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Assets collected by the last [`FormMaker::from_fields`] call.
    pub const fn assets(&self) -> &FormAssets {
        &self.assets
    }

    /// Renders `fields` and recollects the form's assets.
    ///
    /// Fields named by no section are not rendered when sections are set;
    /// section entries naming an unknown field are skipped.
    pub fn from_fields(
        &mut self,
        fields: &[FieldConfig],
        session: &dyn Session,
        config: &dyn ConfigLookup,
    ) -> String {
        let builder = FieldBuilder::new(session, config);

        self.assets = FormAssets::new();
        self.assets.set_validation(self.with_js_validation);
        self.assets.set_form_js(self.form_js.clone());

        let sections = if self.sections.is_empty() {
            vec![Section::untitled(fields.iter().map(FieldConfig::name))]
        } else {
            self.sections.clone()
        };

        let mut html = String::new();
        for section in &sections {
            if let Some(title) = &section.title {
                html.push_str(&format!(
                    r#"<div class="{}"><h4>{}</h4></div>"#,
                    escape_html(&config.config(keys::SECTIONS_HEADER_SPACING, "mt-2 mb-2")),
                    escape_html(title)
                ));
            }

            let section_fields: Vec<&FieldConfig> = section
                .fields
                .iter()
                .filter_map(|name| {
                    let found = fields.iter().find(|field| field.name() == name.as_str());
                    if found.is_none() {
                        tracing::warn!(field = %name, "section names an unknown field");
                    }
                    found
                })
                .collect();

            for field in &section_fields {
                self.assets.collect(field);
            }

            if self.columns > 1 {
                html.push_str(&self.columns_html(&section_fields, &builder, config));
            } else {
                for field in section_fields {
                    html.push_str(&builder.render(field, self.orientation));
                }
            }
        }
        html
    }

    fn columns_html(
        &self,
        fields: &[&FieldConfig],
        builder: &FieldBuilder<'_>,
        config: &dyn ConfigLookup,
    ) -> String {
        let row_class = escape_html(&config.config(keys::SECTIONS_WRAPPER_CLASS, "row"));
        let column_class = escape_html(&format!(
            "{}{}",
            config.config(keys::SECTIONS_COLUMN_BASE, "col-md-"),
            12 / self.columns.min(12)
        ));

        fields
            .chunks(self.columns)
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|field| {
                        format!(
                            r#"<div class="{column_class}">{}</div>"#,
                            builder.render(field, self.orientation)
                        )
                    })
                    .collect();
                format!(r#"<div class="{row_class}">{cells}</div>"#)
            })
            .collect()
    }
}
