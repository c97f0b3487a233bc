#[cfg(feature = "tracing")]
macro_rules! lwtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "loadwindow", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lwtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! lwdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "loadwindow", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lwdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! lwwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "loadwindow", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! lwwarn {
    ($($tt:tt)*) => {};
}
