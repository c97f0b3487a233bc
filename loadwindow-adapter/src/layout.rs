use loadwindow::TerminationPolicy;

/// Fixed gap kept below an auto-fitted container (the space the app chrome
/// reserves under the list).
pub const DEFAULT_FIT_MARGIN: u32 = 10;

/// A layout strategy: how to derive a page size from host geometry, and when
/// a scroll position calls for target growth.
///
/// The host measures its widgets into the strategy's `Metrics` snapshot and
/// pushes it in; strategies never touch the UI themselves. Two strategies are
/// provided, matching the two observed deployments: [`WindowLayout`] and
/// [`ContainerLayout`].
pub trait LayoutStrategy {
    /// Host-measured geometry snapshot consumed by this strategy.
    type Metrics;

    /// Number of estimated rows that fill one viewport.
    ///
    /// `0` means the geometry cannot hold a row yet and suppresses loading.
    fn page_size(&self, metrics: &Self::Metrics, estimated_row_height: u32) -> u32;

    /// The height left for rows (viewport minus header), where the strategy
    /// reports one.
    fn avail_height(&self, metrics: &Self::Metrics) -> Option<u32> {
        let _ = metrics;
        None
    }

    /// The height the host should give the scroll container, where the
    /// strategy sizes it.
    fn fit_height(&self, metrics: &Self::Metrics) -> Option<u32> {
        let _ = metrics;
        None
    }

    /// Rows added to the load target per qualifying scroll trigger.
    fn growth_step(&self, page_size: u32) -> u32;

    /// Whether the scroll position is near the end of the rendered content.
    ///
    /// Takes `&mut self` so strategies can keep scroll-position memory.
    fn near_end(&mut self, metrics: &Self::Metrics) -> bool;

    /// Clears any scroll-position memory; called on window resets.
    fn clear_scroll_memory(&mut self) {}

    /// The end-of-data policy this strategy's deployment was observed with.
    fn default_termination(&self) -> TerminationPolicy;
}

fn rows_for_height(height: u32, estimated_row_height: u32) -> u32 {
    height.div_ceil(estimated_row_height.max(1))
}

/// Geometry snapshot for [`WindowLayout`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowMetrics {
    pub window_height: u32,
    pub header_height: u32,
    pub scroll_y: u64,
    pub document_height: u64,
}

/// Whole-window scrolling: the list shares the window scrollbar and sits
/// below a header of known height.
///
/// Growth steps one row past a page so the freshly filled viewport keeps a
/// scrollable remainder. Observed with [`TerminationPolicy::EmptyPage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowLayout;

impl LayoutStrategy for WindowLayout {
    type Metrics = WindowMetrics;

    fn page_size(&self, metrics: &WindowMetrics, estimated_row_height: u32) -> u32 {
        rows_for_height(
            metrics.window_height.saturating_sub(metrics.header_height),
            estimated_row_height,
        )
    }

    fn avail_height(&self, metrics: &WindowMetrics) -> Option<u32> {
        Some(metrics.window_height.saturating_sub(metrics.header_height))
    }

    fn growth_step(&self, page_size: u32) -> u32 {
        page_size.saturating_add(1)
    }

    fn near_end(&mut self, metrics: &WindowMetrics) -> bool {
        // Less than one viewport of content left below the fold.
        metrics.document_height.saturating_sub(metrics.scroll_y) < metrics.window_height as u64
    }

    fn default_termination(&self) -> TerminationPolicy {
        TerminationPolicy::EmptyPage
    }
}

/// Geometry snapshot for [`ContainerLayout`].
///
/// `scroll_top`/`client_height`/`scroll_height` describe the scrollable
/// container itself, not the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerMetrics {
    pub window_height: u32,
    pub container_top: u32,
    pub container_height: u32,
    pub header_height: u32,
    pub scroll_top: u64,
    pub client_height: u32,
    pub scroll_height: u64,
}

/// A bounded scrollable container with a sticky header inside it.
///
/// With `fit` enabled (the default) the container is sized to fill the
/// viewport below its top edge, minus `fit_margin`; the host applies the
/// height returned from [`LayoutStrategy::fit_height`]. Scroll triggers fire
/// at the container bottom and only on downward motion. Observed with
/// [`TerminationPolicy::ShortPage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerLayout {
    /// Size the container to fill the viewport below its top edge.
    pub fit: bool,
    /// Fixed gap kept below the container when fitting.
    pub fit_margin: u32,
    last_scroll_top: Option<u64>,
}

impl ContainerLayout {
    pub fn new(fit: bool) -> Self {
        Self {
            fit,
            fit_margin: DEFAULT_FIT_MARGIN,
            last_scroll_top: None,
        }
    }

    pub fn with_fit_margin(mut self, fit_margin: u32) -> Self {
        self.fit_margin = fit_margin;
        self
    }

    fn fitted_height(&self, metrics: &ContainerMetrics) -> Option<u32> {
        self.fit.then(|| {
            metrics
                .window_height
                .saturating_sub(metrics.container_top)
                .saturating_sub(self.fit_margin)
        })
    }
}

impl Default for ContainerLayout {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LayoutStrategy for ContainerLayout {
    type Metrics = ContainerMetrics;

    fn page_size(&self, metrics: &ContainerMetrics, estimated_row_height: u32) -> u32 {
        let height = self
            .fitted_height(metrics)
            .unwrap_or(metrics.container_height);
        rows_for_height(
            height.saturating_sub(metrics.header_height),
            estimated_row_height,
        )
    }

    fn fit_height(&self, metrics: &ContainerMetrics) -> Option<u32> {
        self.fitted_height(metrics)
    }

    fn growth_step(&self, page_size: u32) -> u32 {
        page_size
    }

    fn near_end(&mut self, metrics: &ContainerMetrics) -> bool {
        if let Some(last) = self.last_scroll_top {
            // Upward motion never asks for more rows.
            if metrics.scroll_top < last {
                return false;
            }
        }
        self.last_scroll_top = Some(metrics.scroll_top);
        metrics
            .scroll_top
            .saturating_add(metrics.client_height as u64)
            >= metrics.scroll_height
    }

    fn clear_scroll_memory(&mut self) {
        self.last_scroll_top = None;
    }

    fn default_termination(&self) -> TerminationPolicy {
        TerminationPolicy::ShortPage
    }
}
