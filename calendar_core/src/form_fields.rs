/// Create an enum of form fields that can be cycled through with
/// tab/shift-tab. Cycling only visits the fields passed in, so a form can
/// hide some fields depending on its state.
macro_rules! form_fields {
    ($(#[$outer:meta])* $name:ident, $($(#[$meta:meta])* $variant:ident),*) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(test, derive(proptest_derive::Arbitrary))]
        pub enum $name {
            $(
                $(#[$meta])*
                $variant
            ),*
        }

        impl $name {
            /// Rotate through the visible options (e.g. with tab). If this
            /// field isn't visible, start from the first one.
            pub fn next(self, visible: &[Self]) -> Self {
                match visible.iter().position(|field| *field == self) {
                    Some(index) => visible[(index + 1) % visible.len()],
                    None => visible.first().copied().unwrap_or(self),
                }
            }

            /// Rotate through the visible options in reverse (e.g. with
            /// shift-tab). If this field isn't visible, start from the last
            /// one.
            pub fn prev(self, visible: &[Self]) -> Self {
                match visible.iter().position(|field| *field == self) {
                    Some(index) => visible[(index + visible.len() - 1) % visible.len()],
                    None => visible.last().copied().unwrap_or(self),
                }
            }
        }
    };
}

pub(crate) use form_fields;
