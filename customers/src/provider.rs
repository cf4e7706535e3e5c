use {
    fake::{
        Fake,
        faker::{
            internet::en::SafeEmail,
            name::en::{FirstName, LastName},
            phone_number::en::PhoneNumber,
        },
    },
    rand::{Rng, rngs::ThreadRng},
};

/// Source of plausible-looking personal data.
///
/// No uniqueness, determinism or distribution is promised by implementors.
pub trait Provider {
    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
    fn email(&mut self) -> String;
    fn phone_number(&mut self) -> String;
}

impl<P: Provider + ?Sized> Provider for &mut P {
    fn first_name(&mut self) -> String {
        (**self).first_name()
    }

    fn last_name(&mut self) -> String {
        (**self).last_name()
    }

    fn email(&mut self) -> String {
        (**self).email()
    }

    fn phone_number(&mut self) -> String {
        (**self).phone_number()
    }
}

/// English-locale provider backed by the `fake` crate.
pub struct FakeProvider<R> {
    rng: R,
}

impl<R: Rng> FakeProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for FakeProvider<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> Provider for FakeProvider<R> {
    fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    fn email(&mut self) -> String {
        SafeEmail().fake_with_rng(&mut self.rng)
    }

    fn phone_number(&mut self) -> String {
        PhoneNumber().fake_with_rng(&mut self.rng)
    }
}
