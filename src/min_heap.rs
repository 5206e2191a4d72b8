/// Array-backed binary min-heap.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.min_heapify(i);
        }
        heap
    }

    #[cfg(test)]
    pub fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }

    fn min_heapify(&mut self, mut i: usize) {
        let n = self.heap_size();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.heap_size() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[p] <= self.elements[i] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    #[cfg(test)]
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn extract_min(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let n = self.heap_size() - 1;
        self.elements.swap(0, n);
        let result = self.elements.pop();
        self.min_heapify(0);
        result
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_ascending_order() {
        let mut heap = MinHeap::build(vec![9, 4, 7, 1, 8, 2, 2, 6]);
        assert!(heap.valid_min_heap());
        heap.insert(0);
        heap.insert(5);
        assert!(heap.valid_min_heap());
        assert_eq!(heap.peek(), Some(&0));

        let mut out = Vec::new();
        while let Some(v) = heap.extract_min() {
            assert!(heap.valid_min_heap());
            out.push(v);
        }
        assert_eq!(out, vec![0, 1, 2, 2, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn empty_heap() {
        let mut heap: MinHeap<u32> = MinHeap::default();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min(), None);
        heap.insert(3);
        assert_eq!(heap.extract_min(), Some(3));
        assert!(heap.is_empty());
    }

    #[test]
    fn tuple_keys_break_ties_by_second_field() {
        let mut heap = MinHeap::new();
        heap.insert((2, 1));
        heap.insert((1, 3));
        heap.insert((2, 0));
        heap.insert((1, 2));
        let order: Vec<_> = std::iter::from_fn(|| heap.extract_min()).collect();
        assert_eq!(order, vec![(1, 2), (1, 3), (2, 0), (2, 1)]);
    }
}
