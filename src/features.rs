//! Feature flags selecting which post-MVP proposals the decoder accepts.

macro_rules! features {
    ( $( $(#[$meta:meta])* $name:ident; )* ) => {
        /// The set of enabled WebAssembly proposals.
        ///
        /// The MVP (1.0) format is always accepted; each flag independently
        /// unlocks the wire encodings of one proposal. Decoders take the
        /// feature set by reference and evaluate gates at decode time, so a
        /// single table serves every configuration.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct Features {
            $( $(#[$meta])* pub $name: bool, )*
        }

        impl Features {
            /// MVP only: every proposal disabled.
            pub fn new() -> Self {
                Self::default()
            }

            /// Every known proposal enabled.
            pub fn enable_all() -> Self {
                Features {
                    $( $name: true, )*
                }
            }

            $(
                pub fn $name(mut self) -> Self {
                    self.$name = true;
                    self
                }
            )*
        }
    };
}

features! {
    /// `try`/`catch`/`throw`/`rethrow`/`br_on_exn`, the event external
    /// kind, and the event section.
    exceptions;
    /// `Var` mutability on imported globals (a validation-level gate; the
    /// decoder accepts either byte regardless).
    mutable_globals;
    /// The `i32/i64.trunc_sat_*` opcode family (0xFC prefix).
    saturating_float_to_int;
    /// The `i32/i64.extend{8,16,32}_s` opcodes.
    sign_extension;
    /// The `v128` value type and the 0xFD opcode family.
    simd;
    /// Shared limits and the 0xFE atomic opcode family.
    threads;
    /// Passive segments, extended segment flags, `memory.*`/`table.*` bulk
    /// ops, and the data count section.
    bulk_memory;
    /// `anyref`, `ref.null`/`ref.is_null`/`ref.func`, and the table
    /// manipulation opcodes.
    reference_types;
    /// Multi-result function types and block types referencing type
    /// indices.
    multi_value;
    /// `return_call` and `return_call_indirect`.
    tail_call;
}
