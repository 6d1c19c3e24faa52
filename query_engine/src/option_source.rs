//! Where suggestion options come from.

use std::{fmt, future::Future, rc::Rc};

use common::{fuzzy_match::match_options, suggest_option::SuggestOption};
use futures_util::{FutureExt, future::LocalBoxFuture};

pub type RemoteLookup = Rc<dyn Fn(String) -> LocalBoxFuture<'static, anyhow::Result<Vec<SuggestOption>>>>;

/// Suggestion origin of a free-text field.
///
/// The adapter neither debounces nor guards against stale responses; a failing remote
/// lookup is returned as-is for the [`crate::suggestion::SuggestionController`] to absorb.
#[derive(Clone)]
pub enum OptionSource {
    /// The whole list, unfiltered.
    Static(Rc<[SuggestOption]>),
    /// The list filtered by [`match_options`] on every keystroke.
    StaticWithMatcher(Rc<[SuggestOption]>),
    Remote(RemoteLookup),
}

pub enum Suggestions {
    Ready(Vec<SuggestOption>),
    Pending(LocalBoxFuture<'static, anyhow::Result<Vec<SuggestOption>>>),
}

impl OptionSource {
    pub fn fixed(options: impl Into<Vec<SuggestOption>>) -> Self {
        OptionSource::Static(options.into().into())
    }

    pub fn matched(options: impl Into<Vec<SuggestOption>>) -> Self {
        OptionSource::StaticWithMatcher(options.into().into())
    }

    pub fn remote<F, Fut>(lookup: F) -> Self
    where
        F: Fn(String) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<Vec<SuggestOption>>> + 'static,
    {
        OptionSource::Remote(Rc::new(move |keyword| lookup(keyword).boxed_local()))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, OptionSource::Remote(_))
    }

    /// Options shown before the first keystroke.
    pub fn initial_options(&self) -> Vec<SuggestOption> {
        match self {
            OptionSource::Static(options) | OptionSource::StaticWithMatcher(options) => options.to_vec(),
            OptionSource::Remote(_) => Vec::new(),
        }
    }

    pub fn suggest(&self, keyword: &str) -> Suggestions {
        match self {
            OptionSource::Static(options) => Suggestions::Ready(options.to_vec()),
            OptionSource::StaticWithMatcher(options) => Suggestions::Ready(match_options(options, keyword)),
            OptionSource::Remote(lookup) => Suggestions::Pending(lookup(keyword.to_string())),
        }
    }
}

impl fmt::Debug for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSource::Static(options) => f.debug_tuple("Static").field(&options.len()).finish(),
            OptionSource::StaticWithMatcher(options) => f.debug_tuple("StaticWithMatcher").field(&options.len()).finish(),
            OptionSource::Remote(_) => f.write_str("Remote"),
        }
    }
}
