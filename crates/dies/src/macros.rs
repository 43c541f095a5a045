/// Declares the die for a record type.
///
/// This generates:
///
/// - the `$die` type alias for [`Die<$record>`][1],
/// - the `$blank` static, the shared blank die for the record,
/// - the [`Record`][2] implementation, optionally with a custom emptiness rule,
/// - one setter per listed field.
///
/// Fields in the `required` block get a single setter which assigns the value. Fields in the
/// `optional` block are `Option<T>` on the record (only `T` is listed) and get two setters: one
/// which sets `Some(value)` and an `_opt` variant which can also clear the field.
/// The `_opt` variant of an escaped `type_` field is named `type_opt`.
///
/// ```ignore
/// die! {
///     /// Die for [`Sysctl`].
///     SysctlDie, SYSCTL_BLANK for Sysctl {
///         required {
///             name: String,
///             value: String,
///         }
///     }
/// }
/// ```
///
/// [1]: crate::die::Die
/// [2]: crate::die::Record
macro_rules! die {
    (
        $(#[$meta:meta])*
        $die:ident, $blank:ident for $record:ty {
            $(
                required {
                    $( $(#[$rmeta:meta])* $rfield:ident: $rty:ty ),* $(,)?
                }
            )?
            $(
                optional {
                    $( $(#[$ometa:meta])* $ofield:ident: $oty:ty ),* $(,)?
                }
            )?
            $(
                empty($this:ident) $is_empty:block
            )?
        }
    ) => {
        $(#[$meta])*
        pub type $die = $crate::die::Die<$record>;

        #[doc = concat!("The shared blank [`", stringify!($die), "`].")]
        pub static $blank: ::std::sync::LazyLock<$die> =
            ::std::sync::LazyLock::new($crate::die::Die::default);

        impl $crate::die::Record for $record {
            fn blank() -> &'static $crate::die::Die<Self> {
                ::std::sync::LazyLock::force(&$blank)
            }

            $(
                fn is_empty(&self) -> bool {
                    let $this = self;
                    $is_empty
                }
            )?
        }

        impl $crate::die::Die<$record> {
            $($(
                $(#[$rmeta])*
                pub fn $rfield(&self, value: impl Into<$rty>) -> Self {
                    self.die_stamp(|r| r.$rfield = value.into())
                }
            )*)?

            $($(
                $(#[$ometa])*
                pub fn $ofield(&self, value: impl Into<$oty>) -> Self {
                    self.die_stamp(|r| r.$ofield = Some(value.into()))
                }

                $crate::macros::die!(@opt_setter $ofield: $oty);
            )*)?
        }
    };

    // `type_` is the escaped `type` field, its clearing setter drops the trailing underscore.
    (@opt_setter type_: $ty:ty) => {
        pub fn type_opt(&self, value: impl Into<Option<$ty>>) -> Self {
            self.die_stamp(|r| r.type_ = value.into())
        }
    };

    (@opt_setter $field:ident: $ty:ty) => {
        ::paste::paste! {
            pub fn [<$field _opt>](&self, value: impl Into<Option<$ty>>) -> Self {
                self.die_stamp(|r| r.$field = value.into())
            }
        }
    };
}

/// Adds the child dies shared by all top-level objects.
///
/// Every object carries a required `metadata` field; the listed fields (usually `spec` and
/// `status`) are optional children and each get a `<field>_die` method.
macro_rules! object_die {
    ($record:ty { $( $child:ident: $child_ty:ty ),* $(,)? }) => {
        impl $crate::die::Die<$record> {
            /// Edits the object metadata through an [`ObjectMetaDie`][1].
            ///
            /// [1]: crate::apis::meta::v1::ObjectMetaDie
            pub fn metadata_die(
                &self,
                f: impl FnOnce(&$crate::apis::meta::v1::ObjectMetaDie),
            ) -> Self {
                self.die_stamp(|r| {
                    r.metadata = $crate::die::die_with(::std::mem::take(&mut r.metadata), f);
                })
            }

            $(
                ::paste::paste! {
                    pub fn [<$child _die>](
                        &self,
                        f: impl FnOnce(&$crate::die::Die<$child_ty>),
                    ) -> Self {
                        self.die_stamp(|r| {
                            r.$child = $crate::die::die_with_ptr(r.$child.take(), f);
                        })
                    }
                }
            )*
        }
    };
}

pub(crate) use die;
pub(crate) use object_die;
