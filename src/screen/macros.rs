//! The `screen!` macro.

/// Declares a screen struct with one slot per field.
///
/// Each field is written as `name => locator`. The macro generates:
///
/// - the struct, with one private `Option<DeferredElement>` per slot
/// - `new()` and `Default`, registering every descriptor by field name
/// - one accessor per slot returning `Result<&DeferredElement>`
/// - the [`Screen`](crate::screen::Screen) impl the processor uses
///
/// # Example
///
/// ```ignore
/// use screen_objects::{screen, Locator};
///
/// screen! {
///     /// Login screen.
///     pub struct LoginScreen {
///         /// Sign In button.
///         btn_sign_in => Locator::accessibility("SIGN IN", "Sign In button"),
///         txt_username => Locator::xpath("//android.widget.EditText[@resource-id='input28']", "Username textfield"),
///     }
/// }
///
/// let mut login = LoginScreen::new();
/// session.init(&mut login);
/// login.btn_sign_in()?.click().await?;
/// ```
#[macro_export]
macro_rules! screen {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident => $locator:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            __definition: $crate::screen::ScreenDefinition,
            $( $field: ::std::option::Option<$crate::element::DeferredElement>, )*
        }

        impl $name {
            /// Creates the screen with every slot unbound.
            #[allow(dead_code)]
            $vis fn new() -> Self {
                let definition = $crate::screen::ScreenDefinition::builder(stringify!($name))
                    $( .slot(stringify!($field), $locator) )*
                    .build();
                Self {
                    __definition: definition,
                    $( $field: ::std::option::Option::None, )*
                }
            }

            $(
                $(#[$field_meta])*
                #[allow(dead_code)]
                $vis fn $field(&self) -> $crate::error::Result<&$crate::element::DeferredElement> {
                    self.$field
                        .as_ref()
                        .ok_or_else(|| $crate::error::Error::unbound_slot(stringify!($field)))
                }
            )*
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::screen::Screen for $name {
            fn definition(&self) -> &$crate::screen::ScreenDefinition {
                &self.__definition
            }

            fn bind_slot(
                &mut self,
                slot: &str,
                element: $crate::element::DeferredElement,
            ) -> $crate::error::Result<()> {
                match slot {
                    $(
                        stringify!($field) => {
                            self.$field = ::std::option::Option::Some(element);
                            ::std::result::Result::Ok(())
                        }
                    )*
                    other => {
                        ::std::mem::drop(element);
                        ::std::result::Result::Err($crate::error::Error::unknown_slot(other))
                    }
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::locator::Locator;
    use crate::screen::Screen;

    crate::screen! {
        /// Bottom navigation bar.
        #[derive(Debug)]
        struct FooterBar {
            /// Home tab.
            ico_home => Locator::xpath("//android.view.View[1]", "Home icon in footer"),
            ico_settings => Locator::xpath("//android.view.View[2]", "Settings icon in footer"),
        }
    }

    crate::screen! {
        struct Blank {}
    }

    #[test]
    fn test_generated_definition() {
        let footer = FooterBar::new();
        let def = footer.definition();

        assert_eq!(def.name(), "FooterBar");
        assert_eq!(
            def.slot_names().collect::<Vec<_>>(),
            vec!["ico_home", "ico_settings"]
        );
        assert_eq!(
            def.locator("ico_settings").unwrap().alias(),
            "Settings icon in footer"
        );
    }

    #[test]
    fn test_accessor_before_binding() {
        let footer = FooterBar::default();
        assert!(matches!(
            footer.ico_home().unwrap_err(),
            Error::UnboundSlot { .. }
        ));
    }

    fn handle(id: &str) -> crate::element::DeferredElement {
        crate::element::DeferredElement::new(
            std::sync::Arc::new(crate::driver::MockDriver::new()),
            std::sync::Arc::new(Locator::id(id, id)),
            crate::diagnostics::DiagnosticContext::new(),
        )
    }

    #[test]
    fn test_bind_slot_by_name() {
        let mut footer = FooterBar::new();

        footer.bind_slot("ico_settings", handle("settings")).unwrap();
        assert_eq!(footer.ico_settings().unwrap().alias(), "settings");
        assert!(footer.ico_home().is_err());

        assert!(matches!(
            footer.bind_slot("ico_profile", handle("profile")).unwrap_err(),
            Error::UnknownSlot { slot } if slot == "ico_profile"
        ));
    }

    #[test]
    fn test_unknown_slot_is_rejected() {
        let mut blank = Blank::new();
        assert!(blank.definition().is_empty());

        assert!(matches!(
            blank.bind_slot("x", handle("x")).unwrap_err(),
            Error::UnknownSlot { .. }
        ));
    }
}
