/// Use this to define a unique type which will be used as a key to retrieve
/// an independent rng stream from a [`RandomState`](crate::random::RandomState).
#[macro_export]
macro_rules! define_rng {
    ($random_id:ident) => {
        #[derive(Copy, Clone)]
        pub(crate) struct $random_id;

        impl $crate::random::RngId for $random_id {
            type RngType = $crate::rand::rngs::SmallRng;

            fn get_name() -> &'static str {
                stringify!($random_id)
            }
        }

        // Two streams with the same name would share a seed offset.
        $crate::paste::paste! {
            #[doc(hidden)]
            #[no_mangle]
            #[allow(non_upper_case_globals)]
            pub static [<epinet_rng_name_guard_ $random_id>]: () = ();
        }
    };
}
pub use define_rng;
