use std::fmt;

/// A closed genomic interval carrying a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval<Value> {
    pub start: u32,
    pub stop: u32,
    pub value: Value,
}

impl<Value> Interval<Value> {
    pub fn new(s: u32, e: u32, v: Value) -> Self {
        let (start, stop) = if s <= e { (s, e) } else { (e, s) };
        Self {
            start,
            stop,
            value: v,
        }
    }
}

impl<Value> fmt::Display for Interval<Value>
where
    Value: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interval({}, {}): {}", self.start, self.stop, self.value)
    }
}

/// Centered interval tree over u32 coordinates.
#[derive(Debug)]
pub struct IntervalTree<Value> {
    intervals: Vec<Interval<Value>>,
    left: Option<Box<IntervalTree<Value>>>,
    right: Option<Box<IntervalTree<Value>>>,
    center: u32,
}

impl<Value> IntervalTree<Value> {
    fn empty() -> Self {
        Self {
            intervals: Vec::new(),
            left: None,
            right: None,
            center: 0,
        }
    }

    pub fn new(mut intervals: Vec<Interval<Value>>) -> Self {
        if intervals.is_empty() {
            return Self::empty();
        }
        intervals.sort_unstable_by_key(|i| i.start);
        Self::build_tree(intervals, 16, 64, 512, None, None)
    }

    fn build_tree(
        intervals: Vec<Interval<Value>>,
        depth: usize,
        minbucket: usize,
        maxbucket: usize,
        left_extent: Option<u32>,
        right_extent: Option<u32>,
    ) -> Self {
        let left_extent = left_extent.unwrap_or_else(|| intervals.first().unwrap().start);
        let right_extent =
            right_extent.unwrap_or_else(|| intervals.iter().map(|i| i.stop).max().unwrap());

        let center = left_extent / 2 + right_extent / 2 + (left_extent % 2 + right_extent % 2) / 2;

        if depth == 0 || (intervals.len() < minbucket && intervals.len() < maxbucket) {
            return Self {
                intervals,
                left: None,
                right: None,
                center,
            };
        }

        let (lefts, centers): (Vec<_>, Vec<_>) =
            intervals.into_iter().partition(|i| i.stop < center);
        let (centers, rights): (Vec<_>, Vec<_>) =
            centers.into_iter().partition(|i| i.start <= center);

        let left = (!lefts.is_empty()).then(|| {
            Box::new(Self::build_tree(
                lefts,
                depth - 1,
                minbucket,
                maxbucket,
                Some(left_extent),
                Some(center),
            ))
        });
        let right = (!rights.is_empty()).then(|| {
            Box::new(Self::build_tree(
                rights,
                depth - 1,
                minbucket,
                maxbucket,
                Some(center),
                Some(right_extent),
            ))
        });

        Self {
            intervals: centers,
            left,
            right,
            center,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.as_ref().is_none_or(|l| l.is_empty())
            && self.intervals.is_empty()
            && self.right.as_ref().is_none_or(|r| r.is_empty())
    }

    /// The callback borrows intervals for the lifetime of the tree, so
    /// callers may collect references out of the visit.
    pub fn visit_near<'t, F>(&'t self, start: u32, stop: u32, f: &mut F)
    where
        F: FnMut(&'t Interval<Value>),
    {
        if !(self.intervals.is_empty()
            || stop < self.intervals[0].start
            || start > self.intervals.last().unwrap().stop)
        {
            for interval in &self.intervals {
                if interval.stop >= start && interval.start <= stop {
                    f(interval);
                }
            }
        }

        if start <= self.center {
            if let Some(ref left) = self.left {
                left.visit_near(start, stop, f);
            }
        }

        if stop >= self.center {
            if let Some(ref right) = self.right {
                right.visit_near(start, stop, f);
            }
        }
    }

    #[inline]
    pub fn visit_overlapping<'t, F>(&'t self, start: u32, stop: u32, f: &mut F)
    where
        F: FnMut(&'t Interval<Value>),
    {
        self.visit_near(start, stop, &mut |i| {
            if i.stop >= start && i.start <= stop {
                f(i);
            }
        });
    }

    pub fn find_overlapping(&self, start: u32, stop: u32) -> Vec<Interval<Value>>
    where
        Value: Clone,
    {
        let mut result = Vec::new();
        self.visit_overlapping(start, stop, &mut |i| result.push(i.clone()));
        result
    }

    pub fn visit_all<'t, F>(&'t self, f: &mut F)
    where
        F: FnMut(&'t Interval<Value>),
    {
        if let Some(ref left) = self.left {
            left.visit_all(f);
        }
        self.intervals.iter().for_each(&mut *f);
        if let Some(ref right) = self.right {
            right.visit_all(f);
        }
    }
}

impl<Value> Default for IntervalTree<Value> {
    fn default() -> Self {
        Self::empty()
    }
}
