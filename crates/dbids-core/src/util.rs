//! Set algebra and random sampling over DBID collections.
//!
//! Set operations return hash sets. Membership probes always go against the
//! side with constant-time `contains`; a large array on the probed side is
//! converted to a hash set first.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::collections::array::SET_CONVERSION_THRESHOLD;
use crate::collections::{
    ArrayModifiableDbids, ArrayStaticDbids, Dbids, HashSetModifiableDbids, ModifiableDbids,
};
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};
use crate::var::DbidVar;

/// Ids present in both collections.
#[must_use]
pub fn intersection<A, B>(first: &A, second: &B) -> HashSetModifiableDbids
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
{
    intersection_with_threshold(first, second, SET_CONVERSION_THRESHOLD)
}

pub(crate) fn intersection_with_threshold<A, B>(
    first: &A,
    second: &B,
    threshold: usize,
) -> HashSetModifiableDbids
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
{
    let mut out = HashSetModifiableDbids::with_capacity(first.len().min(second.len()));
    let mut collect = |id: Dbid| {
        out.add(&id);
    };
    if probe_second(first, second) {
        for_each_common(first, second, threshold, &mut collect);
    } else {
        for_each_common(second, first, threshold, &mut collect);
    }
    out
}

/// Number of ids present in both collections.
#[must_use]
pub fn intersection_size<A, B>(first: &A, second: &B) -> usize
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
{
    let mut count = 0;
    let mut tally = |_: Dbid| count += 1;
    if probe_second(first, second) {
        for_each_common(first, second, SET_CONVERSION_THRESHOLD, &mut tally);
    } else {
        for_each_common(second, first, SET_CONVERSION_THRESHOLD, &mut tally);
    }
    count
}

/// Decides whether `second` should be the probed side.
///
/// A lone fast-`contains` collection is always probed; otherwise the
/// smaller side is walked.
fn probe_second<A, B>(first: &A, second: &B) -> bool
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
{
    match (first.has_fast_contains(), second.has_fast_contains()) {
        (false, true) => true,
        (true, false) => false,
        _ => first.len() <= second.len(),
    }
}

fn for_each_common<A, B, F>(walk: &A, probe: &B, threshold: usize, mut f: F)
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
    F: FnMut(Dbid),
{
    if !probe.has_fast_contains() && probe.len() > threshold {
        let probe = HashSetModifiableDbids::from_dbids(probe);
        walk.iter().filter(|id| probe.contains(id)).for_each(&mut f);
    } else {
        walk.iter().filter(|id| probe.contains(id)).for_each(&mut f);
    }
}

/// Partition of two collections into their exclusive parts and their
/// common part.
#[derive(Debug, Clone, Default)]
pub struct SymmetricIntersection {
    /// Ids only in the first collection.
    pub first_only: HashSetModifiableDbids,
    /// Ids in both collections.
    pub both: HashSetModifiableDbids,
    /// Ids only in the second collection.
    pub second_only: HashSetModifiableDbids,
}

/// Splits two collections into first-only, common and second-only ids.
#[must_use]
pub fn symmetric_intersection<A, B>(first: &A, second: &B) -> SymmetricIntersection
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
{
    if first.len() > second.len() {
        let swapped = symmetric_intersection(second, first);
        return SymmetricIntersection {
            first_only: swapped.second_only,
            both: swapped.both,
            second_only: swapped.first_only,
        };
    }
    let mut result = SymmetricIntersection {
        second_only: HashSetModifiableDbids::from_dbids(second),
        ..SymmetricIntersection::default()
    };
    for id in first.iter() {
        if result.second_only.remove(&id) {
            result.both.add(&id);
        } else {
            result.first_only.add(&id);
        }
    }
    result
}

/// Ids present in either collection.
#[must_use]
pub fn union<A, B>(first: &A, second: &B) -> HashSetModifiableDbids
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
{
    let mut out = HashSetModifiableDbids::with_capacity(first.len().max(second.len()));
    out.add_all(first);
    out.add_all(second);
    out
}

/// Ids of `first` not present in `second`.
#[must_use]
pub fn difference<A, B>(first: &A, second: &B) -> HashSetModifiableDbids
where
    A: Dbids + ?Sized,
    B: Dbids + ?Sized,
{
    let mut out = HashSetModifiableDbids::from_dbids(first);
    out.remove_all(second);
    out
}

/// Copies any collection into an array, keeping iteration order.
#[must_use]
pub fn ensure_array<D: Dbids + ?Sized>(ids: &D) -> ArrayStaticDbids {
    ArrayStaticDbids::from_dbids(ids)
}

/// Copies any collection into a hash set.
#[must_use]
pub fn ensure_set<D: Dbids + ?Sized>(ids: &D) -> HashSetModifiableDbids {
    HashSetModifiableDbids::from_dbids(ids)
}

/// Fisher-Yates shuffle of the first `limit` positions.
///
/// Positions `0..limit` receive a uniform sample of the whole array; the
/// rest keep whatever was left over.
pub fn random_shuffle<R>(ids: &mut ArrayModifiableDbids, rng: &mut R, limit: usize)
where
    R: Rng + ?Sized,
{
    let store = ids.raw_mut();
    let end = store.len();
    for i in 0..limit.min(end) {
        let j = i + rng.gen_range(0..end - i);
        store.swap(i, j);
    }
}

/// Uniform sample of `k` distinct positions of `ids`.
///
/// Small samples are drawn by rejection into a position set, large ones by
/// a partial shuffle of a full copy.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `k` exceeds the collection size.
pub fn random_sample<D, R>(ids: &D, k: usize, rng: &mut R) -> Result<ArrayModifiableDbids>
where
    D: Dbids + ?Sized,
    R: Rng + ?Sized,
{
    let source = ArrayModifiableDbids::from_dbids(ids);
    sample_array(source, k, rng)
}

/// Like [`random_sample`], never returning `except`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if fewer than `k` ids differ from
/// `except`.
pub fn random_sample_except<D, R>(
    ids: &D,
    except: &impl DbidRef,
    k: usize,
    rng: &mut R,
) -> Result<ArrayModifiableDbids>
where
    D: Dbids + ?Sized,
    R: Rng + ?Sized,
{
    let except = except.internal_index();
    let source: ArrayModifiableDbids = ids.iter().filter(|id| id.as_i32() != except).collect();
    sample_array(source, k, rng)
}

/// Samples a fraction of `ids`.
///
/// `rate <= 0` returns everything, `rate <= 1` is a fraction of the size
/// and larger values are an absolute count (capped at the size).
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a NaN rate.
pub fn random_sample_rate<D, R>(ids: &D, rate: f64, rng: &mut R) -> Result<ArrayModifiableDbids>
where
    D: Dbids + ?Sized,
    R: Rng + ?Sized,
{
    if rate.is_nan() {
        return Err(Error::InvalidArgument("sampling rate is NaN".to_string()));
    }
    let source = ArrayModifiableDbids::from_dbids(ids);
    if rate <= 0.0 {
        return Ok(source);
    }
    let n = source.len();
    let k = if rate <= 1.0 {
        (rate * n as f64) as usize
    } else {
        rate as usize
    };
    sample_array(source, k.min(n), rng)
}

/// One uniformly chosen id, or an unset var for an empty collection.
pub fn random_element<D, R>(ids: &D, rng: &mut R) -> DbidVar
where
    D: Dbids + ?Sized,
    R: Rng + ?Sized,
{
    let n = ids.len();
    if n == 0 {
        return DbidVar::new();
    }
    let pos = rng.gen_range(0..n);
    ids.iter()
        .nth(pos)
        .map_or_else(DbidVar::new, |id| DbidVar::with(&id))
}

/// Shuffles `ids` and cuts them into `parts` nearly equal arrays; the
/// first `len % parts` arrays get one extra id.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for `parts == 0`.
pub fn random_split<D, R>(ids: &D, parts: usize, rng: &mut R) -> Result<Vec<ArrayStaticDbids>>
where
    D: Dbids + ?Sized,
    R: Rng + ?Sized,
{
    if parts == 0 {
        return Err(Error::InvalidArgument(
            "cannot split into zero parts".to_string(),
        ));
    }
    let mut shuffled = ArrayModifiableDbids::from_dbids(ids);
    let size = shuffled.len();
    random_shuffle(&mut shuffled, rng, size);

    let min_size = size / parts;
    let extra = size % parts;
    let data = shuffled.as_slice();
    let mut split = Vec::with_capacity(parts);
    let mut begin = 0;
    for part in 0..parts {
        let len = min_size + usize::from(part < extra);
        split.push(ArrayStaticDbids::new(data[begin..begin + len].to_vec()));
        begin += len;
    }
    Ok(split)
}

fn sample_array<R>(mut source: ArrayModifiableDbids, k: usize, rng: &mut R) -> Result<ArrayModifiableDbids>
where
    R: Rng + ?Sized,
{
    let n = source.len();
    if k > n {
        return Err(Error::InvalidArgument(format!(
            "sample size {k} exceeds population {n}"
        )));
    }
    if k < n >> 2 {
        // Constructive: draw distinct positions until k were hit.
        let mut picked = FxHashSet::default();
        picked.reserve(k);
        let mut sample = ArrayModifiableDbids::with_capacity(k);
        let data = source.as_slice();
        while sample.len() < k {
            let pos = rng.gen_range(0..n);
            if picked.insert(pos) {
                sample.add(&data[pos]);
            }
        }
        Ok(sample)
    } else {
        // Destructive: partial shuffle, then drop the tail.
        random_shuffle(&mut source, rng, k);
        source.truncate(k);
        Ok(source)
    }
}
