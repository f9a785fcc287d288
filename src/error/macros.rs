//! # 错误处理宏

/// 快速创建参数校验错误的宏
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::TakeoutError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::TakeoutError::validation(format!($fmt, $($arg)*))
    };
}

/// 快速创建业务规则错误的宏
#[macro_export]
macro_rules! precondition_error {
    ($msg:expr) => {
        $crate::error::TakeoutError::precondition($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::TakeoutError::precondition(format!($fmt, $($arg)*))
    };
}

/// 确保条件成立，否则返回参数校验错误
#[macro_export]
macro_rules! ensure_validation {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::validation_error!($msg));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::validation_error!($fmt, $($arg)*));
        }
    };
}

/// 确保条件成立，否则返回业务规则错误
#[macro_export]
macro_rules! ensure_precondition {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::precondition_error!($msg));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::precondition_error!($fmt, $($arg)*));
        }
    };
}
