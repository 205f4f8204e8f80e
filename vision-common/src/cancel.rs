use crate::prelude::*;

/// Pass-level cancellation: an optional shared flag (e.g. set by Ctrl+C) and an optional deadline.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
	flag: Option<Arc<AtomicBool>>,
	deadline: Option<(Instant, Duration)>,
}
impl Cancellation {
	/// Never cancels
	#[inline]
	pub fn none() -> Self {
		Self::default()
	}

	#[inline]
	pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Self {
		self.flag = Some(flag);
		self
	}

	/// The budget starts counting now
	#[inline]
	pub fn with_timeout(mut self, budget: Duration) -> Self {
		self.deadline = Some((Instant::now() + budget, budget));
		self
	}

	/// Same flag, with the budget counting from now again
	#[inline]
	pub fn restarted(&self) -> Self {
		Cancellation {
			flag: self.flag.clone(),
			deadline: self.deadline.map(|(_, budget)| (Instant::now() + budget, budget)),
		}
	}

	#[inline]
	pub fn check(&self) -> Result<(), VisionError> {
		if let Some(flag) = &self.flag {
			if flag.load(Ordering::Relaxed) {
				return Err(VisionError::Cancelled);
			}
		}
		if let Some((deadline, budget)) = self.deadline {
			if Instant::now() >= deadline {
				return Err(VisionError::TimedOut(budget));
			}
		}
		Ok(())
	}
}

#[test]
fn test_cancellation() {
	assert_eq!(Cancellation::none().check(), Ok(()));

	let flag = Arc::new(AtomicBool::new(false));
	let cancel = Cancellation::none().with_flag(flag.clone());
	assert_eq!(cancel.check(), Ok(()));
	flag.store(true, Ordering::Release);
	assert_eq!(cancel.check(), Err(VisionError::Cancelled));

	let expired = Cancellation::none().with_timeout(Duration::ZERO);
	assert_eq!(expired.check(), Err(VisionError::TimedOut(Duration::ZERO)));

	assert_eq!(Cancellation::none().with_timeout(Duration::from_secs(3600)).check(), Ok(()));
}

#[test]
fn test_restarted_deadline() {
	let budget = Duration::from_millis(50);
	let cancel = Cancellation::none().with_timeout(budget);
	std::thread::sleep(budget * 2);
	assert_eq!(cancel.check(), Err(VisionError::TimedOut(budget)));
	assert_eq!(cancel.restarted().check(), Ok(()));

	let flag = Arc::new(AtomicBool::new(true));
	assert_eq!(Cancellation::none().with_flag(flag).restarted().check(), Err(VisionError::Cancelled));
	assert_eq!(Cancellation::none().restarted().check(), Ok(()));
}
