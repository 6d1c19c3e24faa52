//! Field descriptors and the input controls rendered for them.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use common::{
    field::{FieldChoice, FieldKind},
    filter_map::FilterValue,
    suggest_option::SuggestOption,
};

use crate::{
    option_source::OptionSource,
    suggestion::{SuggestConfig, SuggestTask, SuggestionController, SuggestionSnapshot},
};

/// One searchable attribute of a list page. Supplied by the page, never mutated here.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub choices: Vec<FieldChoice>,
    pub suggestion_source: Option<OptionSource>,
    pub hide_in_search: bool,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            choices: Vec::new(),
            suggestion_source: None,
            hide_in_search: false,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::FreeText)
    }

    pub fn select(key: impl Into<String>, label: impl Into<String>, choices: Vec<FieldChoice>) -> Self {
        Self { choices, ..Self::new(key, label, FieldKind::SingleSelect) }
    }

    pub fn with_suggestions(mut self, source: OptionSource) -> Self {
        self.suggestion_source = Some(source);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide_in_search = true;
        self
    }

    fn renders_as_text(&self) -> bool {
        matches!(self.kind, FieldKind::FreeText | FieldKind::Unknown)
            || (self.kind == FieldKind::SingleSelect && self.choices.is_empty())
    }
}

/// Fields shown in the search form: hidden fields and action columns are dropped.
pub fn searchable_fields(schema: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    schema.iter().filter(|field| !field.hide_in_search && field.kind.is_searchable()).collect()
}

pub type ChangeHandler = Rc<dyn Fn(FilterValue)>;

pub struct TextInput {
    pub placeholder: String,
    pub value: String,
    on_change: ChangeHandler,
}

impl TextInput {
    pub fn input(&self, text: String) {
        (self.on_change)(FilterValue::Text(text));
    }
}

/// Editable combo: typed text and picked suggestions both become the field value, while
/// only typed text drives the suggestion lookup. The combo never keeps its own value.
pub struct SuggestInput {
    pub placeholder: String,
    pub value: String,
    controller: SuggestionController,
    on_change: ChangeHandler,
}

impl SuggestInput {
    /// Text-entry event. Returns the lookup task to spawn, if any.
    pub fn input(&self, text: String) -> Option<SuggestTask> {
        let task = self.controller.on_keyword_change(&text);
        (self.on_change)(FilterValue::Text(text));
        task
    }

    /// A suggestion was picked.
    pub fn select(&self, option: &SuggestOption) {
        (self.on_change)(FilterValue::Text(option.value.clone()));
    }

    pub fn snapshot(&self) -> SuggestionSnapshot {
        self.controller.snapshot()
    }

    pub fn controller(&self) -> &SuggestionController {
        &self.controller
    }
}

pub struct SelectInput {
    pub placeholder: String,
    pub choices: Vec<FieldChoice>,
    pub selected: Option<String>,
    on_change: ChangeHandler,
}

impl SelectInput {
    pub fn select(&self, value: Option<&str>) {
        (self.on_change)(value.map_or(FilterValue::Null, FilterValue::text));
    }
}

pub struct DateInput {
    pub placeholder: String,
    pub value: Option<String>,
    on_change: ChangeHandler,
}

impl DateInput {
    pub fn set(&self, date: Option<String>) {
        (self.on_change)(date.filter(|d| !d.is_empty()).map_or(FilterValue::Null, FilterValue::Text));
    }
}

pub struct DateRangeInput {
    pub placeholders: [String; 2],
    pub start: Option<String>,
    pub end: Option<String>,
    on_change: ChangeHandler,
}

impl DateRangeInput {
    pub fn set_start(&self, start: Option<String>) {
        self.emit(start, self.end.clone());
    }

    pub fn set_end(&self, end: Option<String>) {
        self.emit(self.start.clone(), end);
    }

    fn emit(&self, start: Option<String>, end: Option<String>) {
        let start = start.unwrap_or_default();
        let end = end.unwrap_or_default();
        if start.is_empty() && end.is_empty() {
            (self.on_change)(FilterValue::Null);
        } else {
            (self.on_change)(FilterValue::date_range(start, end));
        }
    }
}

pub enum FieldControl {
    Text(TextInput),
    Suggest(SuggestInput),
    Select(SelectInput),
    Date(DateInput),
    DateRange(DateRangeInput),
}

impl fmt::Debug for FieldControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldControl::Text(c) => f.debug_struct("Text").field("value", &c.value).finish(),
            FieldControl::Suggest(c) => f.debug_struct("Suggest").field("value", &c.value).finish(),
            FieldControl::Select(c) => f.debug_struct("Select").field("selected", &c.selected).finish(),
            FieldControl::Date(c) => f.debug_struct("Date").field("value", &c.value).finish(),
            FieldControl::DateRange(c) => {
                f.debug_struct("DateRange").field("start", &c.start).field("end", &c.end).finish()
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn display_text(value: &FilterValue) -> String {
    match value {
        FilterValue::Null => String::new(),
        FilterValue::Bool(b) => b.to_string(),
        FilterValue::Number(n) => n.to_string(),
        FilterValue::Text(s) => s.clone(),
        FilterValue::List(items) => items.join(","),
    }
}

/// Builds controls for field descriptors and keeps one [`SuggestionController`] per field
/// key alive between renders.
#[derive(Clone, Default)]
pub struct FieldRenderer {
    config: SuggestConfig,
    controllers: Rc<RefCell<HashMap<String, SuggestionController>>>,
}

impl FieldRenderer {
    pub fn new(config: SuggestConfig) -> Self {
        Self { config, controllers: Rc::default() }
    }

    pub fn render(&self, descriptor: &FieldDescriptor, current: &FilterValue, on_change: ChangeHandler) -> FieldControl {
        let label = &descriptor.label;
        if descriptor.renders_as_text() {
            let value = display_text(current);
            let placeholder = format!("Enter {label}");
            return match &descriptor.suggestion_source {
                Some(source) => FieldControl::Suggest(SuggestInput {
                    placeholder,
                    value,
                    controller: self.controller_for(&descriptor.key, source),
                    on_change,
                }),
                None => FieldControl::Text(TextInput { placeholder, value, on_change }),
            };
        }
        match descriptor.kind {
            FieldKind::SingleSelect => FieldControl::Select(SelectInput {
                placeholder: format!("Select {label}"),
                choices: descriptor.choices.clone(),
                selected: current.as_text().and_then(non_empty),
                on_change,
            }),
            FieldKind::Date => FieldControl::Date(DateInput {
                placeholder: format!("Select {label}"),
                value: current.as_text().and_then(non_empty),
                on_change,
            }),
            FieldKind::DateRange => {
                let (start, end) = current.as_date_range().unwrap_or(("", ""));
                FieldControl::DateRange(DateRangeInput {
                    placeholders: [format!("Start {label}"), format!("End {label}")],
                    start: non_empty(start),
                    end: non_empty(end),
                    on_change,
                })
            }
            FieldKind::FreeText | FieldKind::Action | FieldKind::Unknown => FieldControl::Text(TextInput {
                placeholder: format!("Enter {label}"),
                value: display_text(current),
                on_change,
            }),
        }
    }

    pub fn controller_for(&self, key: &str, source: &OptionSource) -> SuggestionController {
        let mut controllers = self.controllers.borrow_mut();
        let entry = controllers
            .entry(key.to_string())
            .or_insert_with(|| SuggestionController::new(source.clone(), self.config));
        if entry.is_closed() {
            *entry = SuggestionController::new(source.clone(), self.config);
        }
        entry.clone()
    }

    /// Stops every suggestion controller; the next render starts fresh ones.
    pub fn close(&self) {
        for controller in self.controllers.borrow().values() {
            controller.close();
        }
    }
}
