use crate::domain::model::SubdomainSet;

/// Union of two name lists with exact string equality.
pub fn merge_subdomains<A, B>(first: A, second: B) -> SubdomainSet
where
    A: IntoIterator<Item = String>,
    B: IntoIterator<Item = String>,
{
    let mut merged: SubdomainSet = first.into_iter().collect();
    merged.extend(second);
    merged
}

pub fn merge_all<I, L>(lists: I) -> SubdomainSet
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = String>,
{
    lists.into_iter().flatten().collect()
}
