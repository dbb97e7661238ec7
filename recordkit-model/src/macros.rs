/// Declares a record struct and its field registry in one place.
///
/// Expands to a struct whose fields are all `Option<T>` (absent by
/// default), the standard derives plus serde, and a [`Record`] impl whose
/// registry carries one getter/setter pair per field. Field types must
/// implement `Serialize` and `DeserializeOwned`; a stored value the field
/// type cannot represent reads back as absent.
///
/// ```
/// use recordkit_model::{Record, record};
///
/// record! {
///     /// A person in the address book.
///     pub struct Contact("contact") {
///         id: i64,
///         name: String,
///         email: String,
///     }
/// }
///
/// let mut c = Contact::default();
/// c.name = Some("Clay".to_string());
/// assert_eq!(c.get("name"), Some("Clay".into()));
/// ```
///
/// [`Record`]: crate::Record
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($record_type:literal) {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis struct $name {
            $( $(#[$field_meta])* pub $field: ::core::option::Option<$ty>, )+
        }

        impl $crate::Record for $name {
            fn registry() -> &'static $crate::FieldRegistry<Self> {
                static REGISTRY: $crate::FieldRegistry<$name> = $crate::FieldRegistry {
                    record_type: $record_type,
                    fields: &[
                        $(
                            $crate::FieldDef {
                                name: stringify!($field),
                                get: |record| {
                                    record
                                        .$field
                                        .as_ref()
                                        .and_then(|v| $crate::__serde_json::to_value(v).ok())
                                },
                                set: |record, value| {
                                    record.$field = $crate::__serde_json::from_value(value).ok();
                                },
                            },
                        )+
                    ],
                };
                &REGISTRY
            }
        }
    };
}
