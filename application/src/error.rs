//! [`Error`]-related definitions.

use std::{fmt, num::TryFromIntError};

use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use service::{command, infra::database};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// GraphQL API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let mut ext = juniper::Object::with_capacity(1);
        drop(
            ext.add_field("code", juniper::Value::scalar(self.code.to_owned())),
        );
        drop(
            ext.add_field(
                "backtrace",
                juniper::Value::list(
                    self.backtrace
                        .iter()
                        .flat_map(|trace| trace.iter())
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            ),
        );
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

define_error! {
    enum StorageError {
        #[code = "ALREADY_EXISTS"]
        #[status = CONFLICT]
        #[message = "Entity with the same unique value already exists"]
        AlreadyExists,

        #[code = "STILL_REFERENCED"]
        #[status = CONFLICT]
        #[message = "Entity is still referenced by dependent records"]
        StillReferenced,
    }
}

define_error! {
    enum EntityError {
        #[code = "NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Referenced entity does not exist"]
        NotExists,

        #[code = "NAME_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "The provided unique value is already occupied"]
        Occupied,
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        let database::Error::Postgres(e) = self;
        if e.is_unique_violation(None) {
            Some(StorageError::AlreadyExists.into())
        } else if e.is_foreign_key_violation(None) {
            Some(StorageError::StillReferenced.into())
        } else {
            None
        }
    }
}

impl AsError for TryFromIntError {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for command::update_item::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ItemNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::create_location::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(EntityError::Occupied.into()),
        }
    }
}

impl AsError for command::delete::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_sector::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(EntityError::Occupied.into()),
            Self::SectorNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_location::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(EntityError::Occupied.into()),
            Self::LocationNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_floor::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LevelOccupied(_) => Some(EntityError::Occupied.into()),
            Self::FloorNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_room_kind::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(EntityError::Occupied.into()),
            Self::RoomKindNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_category::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(EntityError::Occupied.into()),
            Self::CategoryNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_object::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(EntityError::Occupied.into()),
            Self::ObjectNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_variant::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SpecOccupied(_) => Some(EntityError::Occupied.into()),
            Self::VariantNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::seed_typical_objects::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomKindNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}

impl AsError for command::create_structure::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LocationNameOccupied(_) => Some(EntityError::Occupied.into()),
            Self::SectorNotExists(_)
            | Self::LocationNotExists(_)
            | Self::FloorNotExists(_)
            | Self::RoomKindNotExists(_)
            | Self::CategoryNotExists(_)
            | Self::ObjectNotExists(_)
            | Self::VariantNotExists(_) => Some(EntityError::NotExists.into()),
        }
    }
}
