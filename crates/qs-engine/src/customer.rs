//! Customer records and the day-local customer arena.

use qs_core::CustomerId;

/// Service details, filled in exactly once when the customer reaches the
/// server.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ServiceRecord {
    pub day:            u32,
    pub wait_time:      f64,
    pub departure_time: f64,
}

/// A customer as tracked while its day is being simulated.
#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub arrival_time: f64,
    /// `None` while the customer waits in the queue.
    pub service:      Option<ServiceRecord>,
}

/// Read-only view of a served customer, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomerRecord {
    pub service_day:    u32,
    pub arrival_time:   f64,
    pub wait_time:      f64,
    pub departure_time: f64,
}

impl CustomerRecord {
    /// Time spent in the system (waiting plus service).
    #[inline]
    pub fn time_in_system(&self) -> f64 {
        self.departure_time - self.arrival_time
    }
}

/// Arena of customers indexed by [`CustomerId`].
///
/// The FCFS queue stores ids only; the record behind an id is mutated in
/// place when its service is scheduled.
#[derive(Default, Debug)]
pub struct CustomerTable {
    customers: Vec<Customer>,
}

impl CustomerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new arrival and return its id.
    pub fn push(&mut self, arrival_time: f64) -> CustomerId {
        let id = CustomerId(self.customers.len() as u32);
        self.customers.push(Customer { arrival_time, service: None });
        id
    }

    /// Schedule `id` on the server from `start` until `departure_time`.
    pub fn begin_service(&mut self, id: CustomerId, day: u32, start: f64, departure_time: f64) {
        let customer = &mut self.customers[id.index()];
        debug_assert!(customer.service.is_none(), "{id} scheduled twice");
        customer.service = Some(ServiceRecord {
            day,
            wait_time: start - customer.arrival_time,
            departure_time,
        });
    }

    /// Convert into served-customer records, keeping arrival order.
    ///
    /// Called once a day has closed, when every customer has been served.
    pub fn into_records(self) -> Vec<CustomerRecord> {
        debug_assert!(self.customers.iter().all(|c| c.service.is_some()));
        self.customers
            .into_iter()
            .filter_map(|c| {
                c.service.map(|s| CustomerRecord {
                    service_day:    s.day,
                    arrival_time:   c.arrival_time,
                    wait_time:      s.wait_time,
                    departure_time: s.departure_time,
                })
            })
            .collect()
    }
}
