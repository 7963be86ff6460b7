//! In-memory doubles for the collaborator traits.
//!
//! Every trait method bumps a counter so tests can assert which store calls a
//! request made, or that it made none at all.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use db::store::{
    ApiKeyRecord, ApiKeyStore, Author, NewTicket, Requester, StoreError, ThreadEntry,
    ThreadStore, Ticket, TicketFilter, TicketStore,
};
use sea_orm::DbErr;

pub fn ticket(id: i64, subject: &str, status_id: i64, dept_id: i64, email: &str) -> Ticket {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap() + Duration::hours(id);
    Ticket {
        id,
        number: format!("{}", 100_000 + id),
        subject: subject.to_owned(),
        status_id,
        status_name: match status_id {
            1 => "Open",
            2 => "Resolved",
            3 => "Closed",
            _ => "Unknown",
        }
        .to_owned(),
        dept_id,
        priority_id: 2,
        topic_id: None,
        created_at: created,
        updated_at: created,
        requester: Some(Requester {
            id: id * 10,
            name: email.split('@').next().unwrap_or_default().to_owned(),
            email: email.to_owned(),
        }),
    }
}

pub fn entry(id: i64, ticket: &Ticket, minutes: i64, body: &str, author: Option<(i64, &str)>) -> ThreadEntry {
    ThreadEntry {
        id,
        created_at: ticket.created_at + Duration::minutes(minutes),
        body: body.to_owned(),
        author: author.map(|(id, email)| Author {
            id,
            name: email.split('@').next().unwrap_or_default().to_owned(),
            email: email.to_owned(),
        }),
    }
}

#[derive(Default)]
pub struct FakeApiKeys {
    keys: Mutex<Vec<ApiKeyRecord>>,
    pub lookups: AtomicUsize,
    pub fail: bool,
}

impl FakeApiKeys {
    pub fn with_key(key: &str, ip_address: Option<&str>) -> Self {
        let keys = Self::default();
        keys.add(key, ip_address);
        keys
    }

    /// A store whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn add(&self, key: &str, ip_address: Option<&str>) {
        let mut keys = self.keys.lock().unwrap();
        let id = keys.len() as i64 + 1;
        keys.push(ApiKeyRecord {
            id,
            key: key.to_owned(),
            ip_address: ip_address.map(str::to_owned),
        });
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiKeyStore for FakeApiKeys {
    async fn lookup_by_key(&self, key: &str) -> Result<Option<ApiKeyRecord>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Database(DbErr::Custom("key store offline".into())));
        }
        Ok(self.keys.lock().unwrap().iter().find(|r| r.key == key).cloned())
    }
}

#[derive(Default)]
pub struct Calls {
    pub count: AtomicUsize,
    pub find_page: AtomicUsize,
    pub create: AtomicUsize,
    pub lookup: AtomicUsize,
    pub save: AtomicUsize,
    pub delete: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        [
            &self.count,
            &self.find_page,
            &self.create,
            &self.lookup,
            &self.save,
            &self.delete,
        ]
        .into_iter()
        .map(Self::get)
        .sum()
    }

    pub fn mutations(&self) -> usize {
        Self::get(&self.create) + Self::get(&self.save) + Self::get(&self.delete)
    }
}

#[derive(Default)]
pub struct FakeTickets {
    tickets: Mutex<Vec<Ticket>>,
    pub calls: Calls,
    pub created: Mutex<Vec<NewTicket>>,
    pub pages: Mutex<Vec<(TicketFilter, u64, u64)>>,
    pub rejections: Mutex<Option<Vec<String>>>,
    next_id: AtomicUsize,
}

impl FakeTickets {
    pub fn with(tickets: Vec<Ticket>) -> Self {
        let next = tickets.iter().map(|t| t.id).max().unwrap_or(0) as usize;
        let fake = Self::default();
        *fake.tickets.lock().unwrap() = tickets;
        fake.next_id.store(next, Ordering::SeqCst);
        fake
    }

    /// Makes the next `create` fail validation with these reasons.
    pub fn reject_with(self, reasons: &[&str]) -> Self {
        *self.rejections.lock().unwrap() = Some(reasons.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn get(&self, id: i64) -> Option<Ticket> {
        self.tickets.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }

    fn matches(filter: &TicketFilter, t: &Ticket) -> bool {
        filter.id.is_none_or(|id| t.id == id)
            && filter.status_id.is_none_or(|id| t.status_id == id)
            && filter.dept_id.is_none_or(|id| t.dept_id == id)
            && filter.topic_id.is_none_or(|id| t.topic_id == Some(id))
            && filter
                .subject_contains
                .as_deref()
                .is_none_or(|q| t.subject.to_lowercase().contains(&q.to_lowercase()))
            && filter.requester_email.as_deref().is_none_or(|email| {
                t.requester.as_ref().is_some_and(|r| r.email == email)
            })
    }
}

#[async_trait]
impl TicketStore for FakeTickets {
    async fn count(&self, filter: &TicketFilter) -> Result<u64, StoreError> {
        self.calls.count.fetch_add(1, Ordering::SeqCst);
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets.iter().filter(|t| Self::matches(filter, t)).count() as u64)
    }

    async fn find_page(
        &self,
        filter: &TicketFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Ticket>, StoreError> {
        self.calls.find_page.fetch_add(1, Ordering::SeqCst);
        self.pages.lock().unwrap().push((filter.clone(), limit, offset));

        let mut found: Vec<Ticket> = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| Self::matches(filter, t))
            .cloned()
            .collect();
        found.sort_by_key(|t| t.id);
        Ok(found
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, new_ticket: NewTicket) -> Result<Ticket, StoreError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        if let Some(reasons) = self.rejections.lock().unwrap().take() {
            return Err(StoreError::Validation(reasons));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let mut created = ticket(id, &new_ticket.subject, 1, 1, &new_ticket.email);
        created.topic_id = new_ticket.topic_id;
        self.created.lock().unwrap().push(new_ticket);
        self.tickets.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn lookup(&self, id: i64) -> Result<Option<Ticket>, StoreError> {
        self.calls.lookup.fetch_add(1, Ordering::SeqCst);
        Ok(self.get(id))
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), StoreError> {
        self.calls.save.fetch_add(1, Ordering::SeqCst);
        if !(1..=5).contains(&ticket.status_id) {
            return Err(StoreError::Invalid(format!("Unknown status id {}", ticket.status_id)));
        }
        let mut tickets = self.tickets.lock().unwrap();
        if let Some(stored) = tickets.iter_mut().find(|t| t.id == ticket.id) {
            *stored = ticket.clone();
        }
        Ok(())
    }

    async fn delete(&self, ticket: &Ticket) -> Result<(), StoreError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.tickets.lock().unwrap().retain(|t| t.id != ticket.id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeThreads {
    threads: Mutex<HashMap<i64, Vec<ThreadEntry>>>,
    pub calls: AtomicUsize,
}

impl FakeThreads {
    pub fn with(threads: Vec<(i64, Vec<ThreadEntry>)>) -> Self {
        let fake = Self::default();
        *fake.threads.lock().unwrap() = threads.into_iter().collect();
        fake
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThreadStore for FakeThreads {
    async fn entries(&self, ticket: &Ticket) -> Result<Vec<ThreadEntry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .threads
            .lock()
            .unwrap()
            .get(&ticket.id)
            .cloned()
            .unwrap_or_default())
    }
}
