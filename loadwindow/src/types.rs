use alloc::vec::Vec;

/// The loader's lifecycle status. Exactly one variant holds at any instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadStatus {
    /// No fetch loop in flight; the loaded count covers the target (or no
    /// target has been seeded yet).
    #[default]
    Idle,
    /// A fetch loop is in flight. A second loop cannot start concurrently.
    Loading,
    /// The data source signalled end-of-data. Terminal until a reset.
    Exhausted,
    /// The last fetch failed. Terminal until a reset.
    Error,
}

/// How the fetch loop detects end-of-data.
///
/// The two observed deployments differ here: whole-window scrolling stops on
/// an empty page, the bounded-container variant stops one call earlier on the
/// first short page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationPolicy {
    /// Stop when a fetched page returns zero rows.
    #[default]
    EmptyPage,
    /// Stop when a fetched page returns fewer rows than requested.
    ShortPage,
}

impl TerminationPolicy {
    pub(crate) fn ends_data(self, rows: usize, page_size: u32) -> bool {
        match self {
            Self::EmptyPage => rows == 0,
            Self::ShortPage => rows < page_size as usize,
        }
    }
}

/// One page request, handed to the host's fetch capability.
///
/// `offset` is the number of rows already loaded; the source must return up to
/// `page_size` rows starting there, under the given filter/sort criteria.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRequest<F, S> {
    pub page_size: u32,
    pub offset: usize,
    pub filter: Option<F>,
    pub sort: Option<S>,
}

/// An opaque fetch failure.
///
/// The loader does not retry and does not inspect the failure; it surfaces
/// [`LoadStatus::Error`] and stops until a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchError;

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("page fetch failed")
    }
}

impl core::error::Error for FetchError {}

/// The outcome of one page fetch: the rows, or a failure.
///
/// `Ok(rows)` must contain at most `page_size` rows.
pub type FetchOutcome<T> = Result<Vec<T>, FetchError>;
