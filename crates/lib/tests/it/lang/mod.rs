//! Translation integration tests
//!
//! Exercises the lookup cascade across override, locale and default bundles
//! together with message formatting through [`paperkit::I18n`].

mod lookup;
