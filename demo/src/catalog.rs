//! Catalog 模块：商品评价
use crate::events::CheckCustomerExistsForAddingReview;
use modulith_bus::{DispatchContext, EventBus};
use modulith_core::{Outcome, StatusClass};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub rating: u8,
}

pub struct ReviewService<B> {
    bus: B,
    reviews: Mutex<Vec<Review>>,
}

impl<B: EventBus> ReviewService<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            reviews: Mutex::new(Vec::new()),
        }
    }

    pub async fn add_review(
        &self,
        ctx: &DispatchContext,
        customer_id: Uuid,
        rating: u8,
    ) -> Outcome<Uuid> {
        if !(1..=5).contains(&rating) {
            return Outcome::failure("rating must be between 1 and 5");
        }

        let checked = self
            .bus
            .publish_void(ctx, CheckCustomerExistsForAddingReview { customer_id })
            .await;
        if checked.is_failure() {
            return Outcome::forward(&checked);
        }

        let review = Review {
            id: Uuid::new_v4(),
            customer_id,
            rating,
        };
        let id = review.id;
        let Ok(mut reviews) = self.reviews.lock() else {
            return Outcome::failure_with("review store unavailable", StatusClass::InternalError);
        };
        reviews.push(review);
        Outcome::created(id)
    }

    pub fn count(&self) -> usize {
        self.reviews.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn average_rating_of(&self, customer_id: &Uuid) -> Option<f32> {
        let reviews = self.reviews.lock().ok()?;
        let ratings: Vec<f32> = reviews
            .iter()
            .filter(|r| r.customer_id == *customer_id)
            .map(|r| f32::from(r.rating))
            .collect();
        if ratings.is_empty() {
            return None;
        }
        Some(ratings.iter().sum::<f32>() / ratings.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modulith_bus::InMemoryEventBus;
    use std::sync::Arc;

    #[tokio::test]
    async fn add_review_reports_internal_error_when_store_is_poisoned() {
        // 未注册处理器：存在性检查视为通过
        let service = ReviewService::new(Arc::new(InMemoryEventBus::default()));
        std::thread::scope(|s| {
            let _: std::thread::Result<()> = s
                .spawn(|| {
                    let _held = service.reviews.lock().unwrap();
                    panic!("review store writer crashed");
                })
                .join();
        });

        let out = service
            .add_review(&DispatchContext::default(), Uuid::new_v4(), 4)
            .await;

        assert_eq!(out.status(), StatusClass::InternalError);
        assert_eq!(out.error_message(), Some("review store unavailable"));
    }
}
