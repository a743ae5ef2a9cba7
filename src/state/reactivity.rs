// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;
type SubscriberList = RefCell<Vec<(u64, Callback)>>;

/// Lista de subscribers compartida (push, nunca polling)
#[derive(Clone, Default)]
pub struct Notifier {
    subscribers: Rc<SubscriberList>,
    next_id: Rc<Cell<u64>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suscribirse a cambios. El callback vive mientras viva la `Subscription`.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));

        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Notificar a todos los subscribers.
    /// Se toma una copia de la lista: un callback puede volver a notificar
    /// o cancelar su suscripción sin romper el borrow.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in snapshot {
            callback();
        }
    }
}

/// Guard de suscripción: al hacer drop se elimina el callback
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<SubscriberList>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    notifier: Notifier,
}

impl<T> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            notifier: Notifier::new(),
        }
    }

    /// Leer el valor con un closure (sin clonar)
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notifier.notify();
    }

    /// Actualizar valor usando closure y notificar.
    /// El borrow se libera antes de notificar.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notifier.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.notifier.subscribe(callback)
    }
}

impl<T: Clone> ReactiveState<T> {
    /// Obtener copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

// Los clones comparten valor y subscribers
impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
