use anyhow::Result;
use log::{error, trace};
use std::{
    sync::{mpsc, Arc, Mutex},
    thread,
};

pub struct ThreadPool {
    _workers: Vec<Worker>,
    sender: mpsc::Sender<Job>,
}

type Job = Box<dyn FnOnce() + Send + 'static>;

impl ThreadPool {
    /// Create a new ThreadPool.
    ///
    /// The size is the number of threads in the pool.
    ///
    /// # Panics
    ///
    /// The `new` function will panic if the size is zero.
    pub fn new(size: usize) -> Result<ThreadPool> {
        assert!(size > 0);

        let (sender, receiver) = mpsc::channel();

        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            let worker = Worker::new(id, Arc::clone(&receiver))?;
            workers.push(worker);
        }

        Ok(ThreadPool {
            _workers: workers,
            sender,
        })
    }

    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let job = Box::new(f);

        if let Err(err) = self.sender.send(job) {
            error!("failed to hand job to the pool: {err}");
        }
    }
}

struct Worker {
    _id: usize,
    _thread: thread::JoinHandle<()>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<mpsc::Receiver<Job>>>) -> Result<Worker> {
        let builder = thread::Builder::new();
        let thread = builder.spawn(move || loop {
            let job = receiver
                .lock()
                .expect("failed to acquire lock on receiver")
                .recv();

            match job {
                Ok(job) => {
                    trace!("worker {id} got a job; executing.");
                    job();
                }
                Err(_) => {
                    trace!("worker {id} shutting down; channel closed.");
                    break;
                }
            }
        })?;

        Ok(Worker {
            _id: id,
            _thread: thread,
        })
    }
}
