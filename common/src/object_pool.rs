use tracing::trace;

pub struct ObjectPool<T: Resettable> {
    pool: Vec<T>,
    max_size: usize,
    allocated: usize,
}

impl<T> ObjectPool<T>
where
    T: Resettable,
{
    /// Create a new ObjectPool with a specified maximum size.
    pub fn new(max_size: usize) -> Self {
        ObjectPool {
            pool: Vec::with_capacity(max_size.min(1024)),
            max_size,
            allocated: 0,
        }
    }

    /// Get an object from the pool if available, otherwise return a default object.
    pub fn get(&mut self) -> T
    where
        T: Default,
    {
        match self.pool.pop() {
            Some(obj) => obj,
            None => {
                self.allocated += 1;
                trace!(allocated = self.allocated, "object pool empty, allocating");
                T::default()
            }
        }
    }

    /// Return an object to the pool if the pool is not full, otherwise discard it.
    /// The object is reset before it is stored.
    pub fn return_object(&mut self, mut obj: T) {
        if self.pool.len() < self.max_size {
            obj.reset();
            self.pool.push(obj);
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Objects created because the pool was empty.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Clear all objects from the pool.
    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

pub trait Resettable {
    fn reset(&mut self);
}
