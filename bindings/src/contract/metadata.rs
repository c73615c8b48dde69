use super::error::BindingError;
use alloy::{
    json_abi::{Event, Function, JsonAbi, StateMutability},
    primitives::{B256, Selector},
};
use std::collections::HashMap;

/// Static description of a contract: its name and serialized JSON ABI.
#[derive(Debug, Clone, Copy)]
pub struct ContractMetadata {
    pub name: &'static str,
    pub abi: &'static str,
}

impl ContractMetadata {
    pub const fn new(name: &'static str, abi: &'static str) -> Self {
        Self { name, abi }
    }

    pub fn parse(&self) -> Result<Interface, BindingError> {
        Interface::parse(self.abi)
            .map_err(|e| BindingError::AbiParse(format!("{}: {}", self.name, e)))
    }
}

/// Parsed contract interface with lookups by selector and by event topic.
#[derive(Debug, Clone)]
pub struct Interface {
    abi: JsonAbi,
    functions: HashMap<Selector, Function>,
    events: HashMap<B256, Event>,
}

impl Interface {
    fn parse(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Err("empty interface description".to_string());
        }
        let abi: JsonAbi = serde_json::from_str(json).map_err(|e| e.to_string())?;

        let functions: HashMap<_, _> = abi
            .functions()
            .map(|function| (function.selector(), function.clone()))
            .collect();
        let events: HashMap<_, _> = abi
            .events()
            .map(|event| (event.selector(), event.clone()))
            .collect();

        if functions.is_empty() && events.is_empty() {
            return Err("interface declares no functions and no events".to_string());
        }

        Ok(Self {
            abi,
            functions,
            events,
        })
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn function(&self, selector: &Selector) -> Option<&Function> {
        self.functions.get(selector)
    }

    pub fn event(&self, topic0: &B256) -> Option<&Event> {
        self.events.get(topic0)
    }

    pub fn is_payable(&self, selector: &Selector) -> bool {
        self.function(selector)
            .is_some_and(|function| function.state_mutability == StateMutability::Payable)
    }
}
