use core::marker::PhantomData;

use crate::{DumpResult, JsonWriter, Own, Serializable};

/// Binds the JSON key `name` to a borrowed value for one [`dump_object`]
/// call.
pub struct Field<'a, T: ?Sized, P = Own> {
    name: &'a str,
    value: &'a T,
    strategy: PhantomData<fn() -> P>,
}

impl<'a, T: ?Sized> Field<'a, T> {
    pub fn new(name: &'a str, value: &'a T) -> Self {
        Self {
            name,
            value,
            strategy: PhantomData,
        }
    }
}

impl<'a, T: ?Sized, P> Field<'a, T, P> {
    /// Dumps this field through the adapter `A` instead.
    #[must_use]
    pub fn via<A: Serializable<T>>(self) -> Field<'a, T, A> {
        Field {
            name: self.name,
            value: self.value,
            strategy: PhantomData,
        }
    }
}

/// One member of a [`DumpFieldSet`].
pub trait DumpField {
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Whatever the writer reports.
    fn dump_value<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult;
}

impl<T: ?Sized, P: Serializable<T>> DumpField for Field<'_, T, P> {
    fn name(&self) -> &str {
        self.name
    }

    fn dump_value<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
        P::dump(self.value, writer)
    }
}

/// Fields written as the members of one object, in declaration order.
///
/// Implemented for `()` and for tuples of up to sixteen [`DumpField`]s.
pub trait DumpFieldSet {
    /// Writes `key, value` for every field.
    ///
    /// # Errors
    ///
    /// Whatever the writer reports.
    fn dump_members<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult;
}

impl DumpFieldSet for () {
    fn dump_members<W: JsonWriter + ?Sized>(&self, _writer: &mut W) -> DumpResult {
        Ok(())
    }
}

macro_rules! impl_dump_field_set {
    ($($F:ident: $idx:tt),+) => {
        impl<$($F: DumpField),+> DumpFieldSet for ($($F,)+) {
            fn dump_members<W: JsonWriter + ?Sized>(&self, writer: &mut W) -> DumpResult {
                $(
                    writer.key(self.$idx.name())?;
                    self.$idx.dump_value(writer)?;
                )+
                Ok(())
            }
        }
    };
}

impl_dump_field_set!(F0: 0);
impl_dump_field_set!(F0: 0, F1: 1);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9,
    F10: 10);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9,
    F10: 10, F11: 11);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9,
    F10: 10, F11: 11, F12: 12);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9,
    F10: 10, F11: 11, F12: 12, F13: 13);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9,
    F10: 10, F11: 11, F12: 12, F13: 13, F14: 14);
impl_dump_field_set!(F0: 0, F1: 1, F2: 2, F3: 3, F4: 4, F5: 5, F6: 6, F7: 7, F8: 8, F9: 9,
    F10: 10, F11: 11, F12: 12, F13: 13, F14: 14, F15: 15);

/// Writes one JSON object with a member per field, in the order given.
///
/// Every field is written, including `None` options (as `null`).
///
/// # Errors
///
/// Whatever the writer reports.
pub fn dump_object<W: JsonWriter + ?Sized, F: DumpFieldSet>(writer: &mut W, fields: F) -> DumpResult {
    log::trace!("dump_object: {}", core::any::type_name::<F>());
    writer.start_object()?;
    fields.dump_members(writer)?;
    writer.end_object()
}
