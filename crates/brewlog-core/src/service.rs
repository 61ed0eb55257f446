// ABOUTME: Record service that sits between the HTTP handlers and the repository.
// ABOUTME: Forwards each operation unchanged; cross-field brew rules belong here when they exist.

use crate::model::{Brew, BrewId, NewBrew, Page};
use crate::repository::BrewRepository;

/// Use-case wrapper for brew CRUD. Handlers never talk to storage directly.
pub struct BrewService<R: BrewRepository> {
    repo: R,
}

impl<R: BrewRepository> BrewService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self, page: Page) -> Result<Vec<Brew>, R::Error> {
        self.repo.list(page)
    }

    pub fn get(&self, id: BrewId) -> Result<Option<Brew>, R::Error> {
        self.repo.find_by_id(id)
    }

    pub fn create(&self, fields: &NewBrew) -> Result<Brew, R::Error> {
        let brew = self.repo.insert(fields)?;
        tracing::debug!(id = brew.id, "brew inserted");
        Ok(brew)
    }

    /// Full replacement: optional fields absent from `fields` become null.
    pub fn update(&self, id: BrewId, fields: &NewBrew) -> Result<Option<Brew>, R::Error> {
        self.repo.replace(id, fields)
    }

    pub fn delete(&self, id: BrewId) -> Result<bool, R::Error> {
        self.repo.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::cell::{Cell, RefCell};
    use std::convert::Infallible;

    /// In-memory repository double.
    #[derive(Default)]
    struct MemoryRepo {
        rows: RefCell<Vec<Brew>>,
        next_id: Cell<BrewId>,
    }

    impl BrewRepository for MemoryRepo {
        type Error = Infallible;

        fn find_by_id(&self, id: BrewId) -> Result<Option<Brew>, Infallible> {
            Ok(self.rows.borrow().iter().find(|b| b.id == id).cloned())
        }

        fn list(&self, page: Page) -> Result<Vec<Brew>, Infallible> {
            Ok(self
                .rows
                .borrow()
                .iter()
                .rev()
                .skip(page.skip as usize)
                .take(page.limit as usize)
                .cloned()
                .collect())
        }

        fn insert(&self, fields: &NewBrew) -> Result<Brew, Infallible> {
            self.next_id.set(self.next_id.get() + 1);
            let brew = Brew {
                id: self.next_id.get(),
                fields: fields.clone(),
                created_at: Utc::now(),
                updated_at: None,
            };
            self.rows.borrow_mut().push(brew.clone());
            Ok(brew)
        }

        fn replace(&self, id: BrewId, fields: &NewBrew) -> Result<Option<Brew>, Infallible> {
            let mut rows = self.rows.borrow_mut();
            let Some(row) = rows.iter_mut().find(|b| b.id == id) else {
                return Ok(None);
            };
            row.fields = fields.clone();
            row.updated_at = Some(Utc::now());
            Ok(Some(row.clone()))
        }

        fn delete(&self, id: BrewId) -> Result<bool, Infallible> {
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|b| b.id != id);
            Ok(rows.len() != before)
        }
    }

    fn espresso() -> NewBrew {
        NewBrew {
            bean_type: "Colombian".to_string(),
            brew_type: "Espresso".to_string(),
            water_temp: 93.0,
            weight_in: 18.0,
            weight_out: 36.0,
            brew_time: "00:25".to_string(),
            bloom_time: Some(0),
            details: Some("Fine grind".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn create_then_get_round_trips_fields() {
        let service = BrewService::new(MemoryRepo::default());
        let created = service.create(&espresso()).unwrap();
        assert_eq!(created.id, 1);
        assert!(created.updated_at.is_none());

        let fetched = service.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.fields, espresso());
    }

    #[test]
    fn update_replaces_and_missing_id_is_none() {
        let service = BrewService::new(MemoryRepo::default());
        let created = service.create(&espresso()).unwrap();

        let mut changed = espresso();
        changed.bean_type = "Ethiopian".to_string();
        changed.details = None;
        let updated = service.update(created.id, &changed).unwrap().unwrap();
        assert_eq!(updated.fields, changed);
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.created_at, created.created_at);

        assert!(service.update(999, &changed).unwrap().is_none());
        let all = service.list(Page::default()).unwrap();
        assert_eq!(all, vec![updated]);
    }

    #[test]
    fn delete_reports_absence() {
        let service = BrewService::new(MemoryRepo::default());
        let created = service.create(&espresso()).unwrap();
        assert!(service.delete(created.id).unwrap());
        assert!(!service.delete(created.id).unwrap());
        assert!(service.get(created.id).unwrap().is_none());
    }

    #[test]
    fn list_forwards_page() {
        let service = BrewService::new(MemoryRepo::default());
        for _ in 0..3 {
            service.create(&espresso()).unwrap();
        }
        let ids: Vec<_> = service
            .list(Page { skip: 1, limit: 5 })
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
