use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use validator::ValidateEmail;

use crate::models::{
    help_topics,
    thread_entries::{self, ThreadKind},
    ticket_statuses,
    tickets::{self, Column},
    users,
};
use crate::store::{NewTicket, Requester, StoreError, Ticket, TicketFilter, TicketStore};

const SUBJECT_MAX_LEN: usize = 255;
const NUMBER_ATTEMPTS: usize = 10;

/// Routing values applied to new tickets when the help topic does not supply them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketDefaults {
    pub dept_id: i64,
    pub priority_id: i64,
    pub status_id: i64,
}

impl Default for TicketDefaults {
    fn default() -> Self {
        Self {
            dept_id: 1,
            priority_id: 2,
            status_id: 1,
        }
    }
}

impl TicketDefaults {
    pub fn from_config() -> Self {
        Self {
            dept_id: util::config::default_dept_id(),
            priority_id: util::config::default_priority_id(),
            status_id: util::config::default_status_id(),
        }
    }
}

#[derive(Clone)]
pub struct TicketRepository {
    db: DatabaseConnection,
    defaults: TicketDefaults,
}

impl TicketRepository {
    pub fn new(db: DatabaseConnection, defaults: TicketDefaults) -> Self {
        Self { db, defaults }
    }

    fn apply_filter(filter: &TicketFilter) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = filter.id {
            condition = condition.add(Column::Id.eq(id));
        }
        if let Some(status_id) = filter.status_id {
            condition = condition.add(Column::StatusId.eq(status_id));
        }
        if let Some(dept_id) = filter.dept_id {
            condition = condition.add(Column::DeptId.eq(dept_id));
        }
        if let Some(q) = &filter.subject_contains {
            condition = condition.add(
                Expr::col((tickets::Entity, Column::Subject))
                    .like(LikeExpr::new(format!("%{}%", escape_like(q))).escape('\\')),
            );
        }
        if let Some(email) = &filter.requester_email {
            condition = condition.add(
                Column::UserId.in_subquery(
                    Query::select()
                        .column(users::Column::Id)
                        .from(users::Entity)
                        .and_where(users::Column::Email.eq(email.as_str()))
                        .to_owned(),
                ),
            );
        }
        if let Some(topic_id) = filter.topic_id {
            condition = condition.add(Column::TopicId.eq(topic_id));
        }
        condition
    }

    /// Attaches status names and requesters using one query per related table.
    async fn hydrate<C: ConnectionTrait>(
        db: &C,
        models: Vec<tickets::Model>,
    ) -> Result<Vec<Ticket>, DbErr> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let status_ids: BTreeSet<i64> = models.iter().map(|m| m.status_id).collect();
        let user_ids: BTreeSet<i64> = models.iter().map(|m| m.user_id).collect();

        let statuses: HashMap<i64, String> = ticket_statuses::Entity::find()
            .filter(ticket_statuses::Column::Id.is_in(status_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let requesters: HashMap<i64, Requester> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    Requester {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    },
                )
            })
            .collect();

        Ok(models
            .into_iter()
            .map(|m| Ticket {
                status_name: statuses.get(&m.status_id).cloned().unwrap_or_default(),
                requester: requesters.get(&m.user_id).cloned(),
                id: m.id,
                number: m.number,
                subject: m.subject,
                status_id: m.status_id,
                dept_id: m.dept_id,
                priority_id: m.priority_id,
                topic_id: m.topic_id,
                created_at: m.created_at,
                updated_at: m.updated_at,
            })
            .collect())
    }

    /// Checks the request against domain rules, returning the chosen help topic.
    async fn validate(&self, new_ticket: &NewTicket) -> Result<Option<help_topics::Model>, StoreError> {
        let mut errors = Vec::new();

        if !new_ticket.email.trim().validate_email() {
            errors.push("Valid email address required".to_owned());
        }

        let subject = new_ticket.subject.trim();
        if subject.is_empty() {
            errors.push("Subject is required".to_owned());
        } else if subject.chars().count() > SUBJECT_MAX_LEN {
            errors.push(format!("Subject must be at most {SUBJECT_MAX_LEN} characters"));
        }

        if new_ticket.message.trim().is_empty() {
            errors.push("Message is required".to_owned());
        }

        let topic = match new_ticket.topic_id {
            Some(topic_id) => {
                let topic = help_topics::Model::find_active(&self.db, topic_id).await?;
                if topic.is_none() {
                    errors.push("Invalid help topic".to_owned());
                }
                topic
            }
            None => None,
        };

        if errors.is_empty() {
            Ok(topic)
        } else {
            Err(StoreError::Validation(errors))
        }
    }

    async fn find_or_create_requester<C: ConnectionTrait>(
        db: &C,
        name: &str,
        email: &str,
    ) -> Result<users::Model, DbErr> {
        if let Some(user) = users::Model::find_by_email(db, email).await? {
            return Ok(user);
        }

        let name = match name.trim() {
            "" => email.split('@').next().unwrap_or(email),
            name => name,
        };
        users::Model::create(db, name, email).await
    }

    async fn allocate_number<C: ConnectionTrait>(db: &C) -> Result<String, StoreError> {
        for _ in 0..NUMBER_ATTEMPTS {
            let number = random_number();
            if !tickets::Model::number_exists(db, &number).await? {
                return Ok(number);
            }
        }
        Err(StoreError::Invalid(
            "Unable to allocate a unique ticket number".to_owned(),
        ))
    }
}

/// Escapes `LIKE` metacharacters so user input only matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn random_number() -> String {
    rand::thread_rng().gen_range(100_000..=999_999u32).to_string()
}

#[async_trait]
impl TicketStore for TicketRepository {
    async fn count(&self, filter: &TicketFilter) -> Result<u64, StoreError> {
        let total = tickets::Entity::find()
            .filter(Self::apply_filter(filter))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    async fn find_page(
        &self,
        filter: &TicketFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Ticket>, StoreError> {
        let models = tickets::Entity::find()
            .filter(Self::apply_filter(filter))
            .order_by_asc(Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(Self::hydrate(&self.db, models).await?)
    }

    async fn create(&self, new_ticket: NewTicket) -> Result<Ticket, StoreError> {
        let topic = self.validate(&new_ticket).await?;

        let dept_id = topic
            .as_ref()
            .and_then(|t| t.dept_id)
            .unwrap_or(self.defaults.dept_id);
        let priority_id = topic
            .as_ref()
            .and_then(|t| t.priority_id)
            .unwrap_or(self.defaults.priority_id);

        let email = new_ticket.email.trim();
        let txn = self.db.begin().await?;

        let requester = Self::find_or_create_requester(&txn, &new_ticket.name, email).await?;
        let number = Self::allocate_number(&txn).await?;
        let now = Utc::now();

        let ticket = tickets::ActiveModel {
            number: Set(number),
            subject: Set(new_ticket.subject.trim().to_owned()),
            user_id: Set(requester.id),
            status_id: Set(self.defaults.status_id),
            dept_id: Set(dept_id),
            priority_id: Set(priority_id),
            topic_id: Set(new_ticket.topic_id),
            source: Set(new_ticket.source.clone()),
            ip_address: Set(Some(new_ticket.ip_address.clone())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        thread_entries::Model::create(
            &txn,
            ticket.id,
            Some(requester.id),
            ThreadKind::Message,
            &new_ticket.message,
        )
        .await?;

        txn.commit().await?;

        tracing::info!(
            ticket_id = ticket.id,
            number = %ticket.number,
            requester = requester.id,
            "Ticket opened"
        );

        Self::hydrate(&self.db, vec![ticket])
            .await?
            .pop()
            .ok_or_else(|| StoreError::Invalid("Created ticket could not be loaded".to_owned()))
    }

    async fn lookup(&self, id: i64) -> Result<Option<Ticket>, StoreError> {
        let Some(model) = tickets::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(Self::hydrate(&self.db, vec![model]).await?.pop())
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), StoreError> {
        if ticket_statuses::Entity::find_by_id(ticket.status_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(StoreError::Invalid(format!(
                "Unknown status id {}",
                ticket.status_id
            )));
        }

        if let Some(topic_id) = ticket.topic_id {
            if help_topics::Entity::find_by_id(topic_id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(StoreError::Invalid(format!("Unknown help topic id {topic_id}")));
            }
        }

        let model = tickets::Entity::find_by_id(ticket.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::Invalid(format!("Ticket {} no longer exists", ticket.id)))?;

        let mut active: tickets::ActiveModel = model.into();
        active.status_id = Set(ticket.status_id);
        active.topic_id = Set(ticket.topic_id);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;

        Ok(())
    }

    async fn delete(&self, ticket: &Ticket) -> Result<(), StoreError> {
        let txn = self.db.begin().await?;

        thread_entries::Entity::delete_many()
            .filter(thread_entries::Column::TicketId.eq(ticket.id))
            .exec(&txn)
            .await?;
        tickets::Entity::delete_by_id(ticket.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
