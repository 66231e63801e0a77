/// Run the exit handlers, then log the concatenated operands and terminate.
///
/// ```no_run
/// let path = "/tmp/data";
/// atexit::fatal!("cannot open ", path);
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:expr),+ $(,)?) => {
        $crate::fatal($crate::FatalMessage::plain([
            $(::std::string::ToString::to_string(&$arg)),+
        ]))
    };
}

/// Run the exit handlers, then log a `format!` style message and terminate.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatal($crate::FatalMessage::formatted(::std::format_args!($($arg)+)))
    };
}

/// Run the exit handlers, then log each operand on its own line and terminate.
#[macro_export]
macro_rules! fatalln {
    ($($arg:expr),+ $(,)?) => {
        $crate::fatal($crate::FatalMessage::lines([
            $(::std::string::ToString::to_string(&$arg)),+
        ]))
    };
}
