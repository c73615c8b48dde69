use alloy::primitives::{Address, B256, U256, aliases::U48};

/// Conversion of an indexed event argument into its topic word.
pub trait IntoTopic {
    fn into_topic(self) -> B256;
}

impl IntoTopic for Address {
    fn into_topic(self) -> B256 {
        self.into_word()
    }
}

impl IntoTopic for B256 {
    fn into_topic(self) -> B256 {
        self
    }
}

impl IntoTopic for U48 {
    fn into_topic(self) -> B256 {
        B256::from(U256::from(self.to::<u64>()))
    }
}

/// Builds one topic position from a list of accepted values. An empty list matches anything.
pub fn topic_set<T: IntoTopic + Copy>(values: &[T]) -> Vec<B256> {
    values.iter().map(|value| value.into_topic()).collect()
}

/// Lays out indexed-argument sets as `topic1..topic3`; missing positions are wildcards.
pub fn positional(sets: Vec<Vec<B256>>) -> [Vec<B256>; 3] {
    let mut sets = sets.into_iter();
    [
        sets.next().unwrap_or_default(),
        sets.next().unwrap_or_default(),
        sets.next().unwrap_or_default(),
    ]
}
