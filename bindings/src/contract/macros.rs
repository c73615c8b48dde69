//! Expansion of the per-contract binding surface.
//!
//! Each contract module declares its role bindings once with [`define_binding`] and lists its
//! functions and events; the macros below keep the plain, session and role-session variants of
//! every accessor in lock-step.

/// Declares the binding root, the three role bindings and the session types of one contract.
macro_rules! define_binding {
    (
        $(#[$meta:meta])*
        $root:ident {
            metadata: $metadata:path,
            caller: $caller:ident,
            transactor: $transactor:ident,
            filterer: $filterer:ident,
            session: $session:ident,
            caller_session: $caller_session:ident,
            transactor_session: $transactor_session:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $root<B> {
            pub caller: $caller<B>,
            pub transactor: $transactor<B>,
            pub filterer: $filterer<B>,
        }

        /// Read-only half of the binding.
        pub struct $caller<B> {
            contract: $crate::contract::BoundContract<B>,
        }

        /// Write-only half of the binding.
        pub struct $transactor<B> {
            contract: $crate::contract::BoundContract<B>,
        }

        /// Event log half of the binding.
        pub struct $filterer<B> {
            contract: $crate::contract::BoundContract<B>,
        }

        /// Binding with pre-set call and transact options.
        pub struct $session<'a, B> {
            pub contract: &'a $root<B>,
            pub call_opts: $crate::contract::CallOpts,
            pub transact_opts: $crate::contract::TransactOpts,
        }

        /// Read-only binding with pre-set call options.
        pub struct $caller_session<'a, B> {
            pub caller: &'a $caller<B>,
            pub opts: $crate::contract::CallOpts,
        }

        /// Write-only binding with pre-set transact options.
        pub struct $transactor_session<'a, B> {
            pub transactor: &'a $transactor<B>,
            pub opts: $crate::contract::TransactOpts,
        }

        impl<B: $crate::contract::ContractBackend> $root<B> {
            pub fn new(
                address: ::alloy::primitives::Address,
                backend: ::std::sync::Arc<B>,
            ) -> Result<Self, $crate::contract::BindingError> {
                let contract = $crate::contract::BoundContract::new(address, &$metadata, backend)?;
                Ok(Self {
                    caller: $caller {
                        contract: contract.clone(),
                    },
                    transactor: $transactor {
                        contract: contract.clone(),
                    },
                    filterer: $filterer { contract },
                })
            }

            pub fn address(&self) -> ::alloy::primitives::Address {
                self.caller.contract.address()
            }

            pub fn session(
                &self,
                call_opts: $crate::contract::CallOpts,
                transact_opts: $crate::contract::TransactOpts,
            ) -> $session<'_, B> {
                $session {
                    contract: self,
                    call_opts,
                    transact_opts,
                }
            }
        }

        impl<B: $crate::contract::ContractBackend> $caller<B> {
            pub fn new(
                address: ::alloy::primitives::Address,
                backend: ::std::sync::Arc<B>,
            ) -> Result<Self, $crate::contract::BindingError> {
                Ok(Self {
                    contract: $crate::contract::BoundContract::new(address, &$metadata, backend)?,
                })
            }

            pub fn session(&self, opts: $crate::contract::CallOpts) -> $caller_session<'_, B> {
                $caller_session { caller: self, opts }
            }
        }

        impl<B: $crate::contract::ContractBackend> $transactor<B> {
            pub fn new(
                address: ::alloy::primitives::Address,
                backend: ::std::sync::Arc<B>,
            ) -> Result<Self, $crate::contract::BindingError> {
                Ok(Self {
                    contract: $crate::contract::BoundContract::new(address, &$metadata, backend)?,
                })
            }

            pub fn session(
                &self,
                opts: $crate::contract::TransactOpts,
            ) -> $transactor_session<'_, B> {
                $transactor_session {
                    transactor: self,
                    opts,
                }
            }
        }

        impl<B: $crate::contract::ContractBackend> $filterer<B> {
            pub fn new(
                address: ::alloy::primitives::Address,
                backend: ::std::sync::Arc<B>,
            ) -> Result<Self, $crate::contract::BindingError> {
                Ok(Self {
                    contract: $crate::contract::BoundContract::new(address, &$metadata, backend)?,
                })
            }
        }
    };
}

/// Read accessors: `eth_call` with typed arguments and a typed return value.
macro_rules! read_accessors {
    (
        module: $module:ident,
        caller: $caller:ident,
        caller_session: $caller_session:ident,
        session: $session:ident;
        $(
            $(#[$meta:meta])*
            fn $name:ident($($arg:ident: $ty:ty),* $(,)?) => $call:ident;
        )*
    ) => {
        impl<B: $crate::contract::ContractBackend> $caller<B> {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    opts: &$crate::contract::CallOpts,
                    $($arg: $ty),*
                ) -> Result<
                    <$module::$call as ::alloy::sol_types::SolCall>::Return,
                    $crate::contract::BindingError,
                > {
                    let call = <$module::$call as ::alloy::sol_types::SolCall>::new(($($arg,)*));
                    self.contract.call(opts, call).await
                }
            )*
        }

        impl<B: $crate::contract::ContractBackend> $caller_session<'_, B> {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    $($arg: $ty),*
                ) -> Result<
                    <$module::$call as ::alloy::sol_types::SolCall>::Return,
                    $crate::contract::BindingError,
                > {
                    self.caller.$name(&self.opts, $($arg),*).await
                }
            )*
        }

        impl<B: $crate::contract::ContractBackend> $session<'_, B> {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    $($arg: $ty),*
                ) -> Result<
                    <$module::$call as ::alloy::sol_types::SolCall>::Return,
                    $crate::contract::BindingError,
                > {
                    self.contract.caller.$name(&self.call_opts, $($arg),*).await
                }
            )*
        }
    };
}

/// Write accessors: a signed transaction per call, returning its hash.
macro_rules! write_accessors {
    (
        module: $module:ident,
        transactor: $transactor:ident,
        transactor_session: $transactor_session:ident,
        session: $session:ident;
        $(
            $(#[$meta:meta])*
            fn $name:ident($($arg:ident: $ty:ty),* $(,)?) => $call:ident;
        )*
    ) => {
        impl<B: $crate::contract::ContractBackend> $transactor<B> {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    opts: &$crate::contract::TransactOpts,
                    $($arg: $ty),*
                ) -> Result<::alloy::primitives::TxHash, $crate::contract::BindingError> {
                    let call = <$module::$call as ::alloy::sol_types::SolCall>::new(($($arg,)*));
                    self.contract.transact(opts, call).await
                }
            )*
        }

        impl<B: $crate::contract::ContractBackend> $transactor_session<'_, B> {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    $($arg: $ty),*
                ) -> Result<::alloy::primitives::TxHash, $crate::contract::BindingError> {
                    self.transactor.$name(&self.opts, $($arg),*).await
                }
            )*
        }

        impl<B: $crate::contract::ContractBackend> $session<'_, B> {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    $($arg: $ty),*
                ) -> Result<::alloy::primitives::TxHash, $crate::contract::BindingError> {
                    self.contract.transactor.$name(&self.transact_opts, $($arg),*).await
                }
            )*
        }
    };
}

/// Filter, watch and parse accessors for each event. Indexed arguments are passed as lists of
/// accepted values in topic order; an empty list matches any value.
macro_rules! event_accessors {
    (
        module: $module:ident,
        filterer: $filterer:ident;
        $(
            $event:ident => $filter:ident, $watch:ident, $parse:ident ($($topic:ident: $tty:ty),* $(,)?);
        )*
    ) => {
        impl<B: $crate::contract::ContractBackend> $filterer<B> {
            $(
                pub async fn $filter(
                    &self,
                    opts: &$crate::contract::FilterOpts,
                    $($topic: &[$tty]),*
                ) -> Result<$crate::contract::EventIterator<$module::$event>, $crate::contract::BindingError> {
                    let topics = $crate::contract::topics::positional(::std::vec![
                        $($crate::contract::topics::topic_set($topic)),*
                    ]);
                    self.contract.filter_logs(opts, topics).await
                }

                pub async fn $watch(
                    &self,
                    opts: $crate::contract::WatchOpts,
                    sink: ::tokio::sync::mpsc::Sender<$crate::contract::DecodedLog<$module::$event>>,
                    $($topic: &[$tty]),*
                ) -> Result<$crate::contract::WatchHandle, $crate::contract::BindingError> {
                    let topics = $crate::contract::topics::positional(::std::vec![
                        $($crate::contract::topics::topic_set($topic)),*
                    ]);
                    self.contract.watch_logs(opts, sink, topics).await
                }

                pub fn $parse(
                    &self,
                    log: &::alloy::rpc::types::Log,
                ) -> Result<$crate::contract::DecodedLog<$module::$event>, $crate::contract::BindingError> {
                    self.contract.unpack_log(log)
                }
            )*
        }
    };
}

pub(crate) use {define_binding, event_accessors, read_accessors, write_accessors};
