//! Shared fixtures: a small layered shop project and a cyclic pair.

#![allow(dead_code)]

use archgraph::NodeId;
use archgraph_facts::{
    CallSiteFact, Callee, ClassFact, ExpressionShape, FileFacts, MemoryFactSource, MethodFact,
};

pub const CONTROLLER_FILE: &str = "src/main/java/com/shop/web/OrderController.java";
pub const SERVICE_FILE: &str = "src/main/java/com/shop/service/OrderService.java";
pub const SERVICE_IMPL_FILE: &str = "src/main/java/com/shop/service/OrderServiceImpl.java";
pub const AUDIT_FILE: &str = "src/main/java/com/shop/service/AuditOrderService.java";
pub const REPOSITORY_FILE: &str = "src/main/java/com/shop/repository/OrderRepository.java";
pub const ORDER_FILE: &str = "src/main/java/com/shop/model/Order.java";

/// A six-file project exercising every layer and call shape the engine
/// distinguishes: a controller calling through an interface with two
/// implementors, a direct repository call, an entity call, and one
/// unresolved reflective call.
pub fn shop_source() -> MemoryFactSource {
    let controller = FileFacts::new(CONTROLLER_FILE)
        .with_class(ClassFact::new("com.shop.web.OrderController").with_annotation("RestController"))
        .with_method(
            MethodFact::new("com.shop.web.OrderController", "placeOrder")
                .with_parameters(&["Cart"])
                .with_complexity(3),
        )
        .with_method(
            MethodFact::new("com.shop.web.OrderController", "getOrder").with_parameters(&["long"]),
        )
        .with_call(
            CallSiteFact::new(
                "com.shop.web.OrderController",
                "placeOrder(Cart)",
                Callee::resolved("com.shop.service.OrderService", "placeOrder"),
                ExpressionShape::Direct,
            )
            .at_line(20),
        )
        .with_call(
            CallSiteFact::new(
                "com.shop.web.OrderController",
                "getOrder(long)",
                Callee::resolved("com.shop.service.OrderService", "findOrder"),
                ExpressionShape::Direct,
            )
            .at_line(30),
        );

    let service = FileFacts::new(SERVICE_FILE)
        .with_class(ClassFact::new("com.shop.service.OrderService").interface())
        .with_method(
            MethodFact::new("com.shop.service.OrderService", "placeOrder")
                .with_parameters(&["Cart"]),
        );

    let service_impl = FileFacts::new(SERVICE_IMPL_FILE)
        .with_class(
            ClassFact::new("com.shop.service.OrderServiceImpl")
                .with_annotation("Service")
                .with_interface("com.shop.service.OrderService"),
        )
        .with_method(
            MethodFact::new("com.shop.service.OrderServiceImpl", "placeOrder")
                .with_parameters(&["Cart"])
                .with_complexity(4)
                .with_lines_of_code(25),
        )
        .with_method(
            MethodFact::new("com.shop.service.OrderServiceImpl", "findOrder")
                .with_parameters(&["long"]),
        )
        .with_call(
            CallSiteFact::new(
                "com.shop.service.OrderServiceImpl",
                "placeOrder(Cart)",
                Callee::resolved("com.shop.repository.OrderRepository", "save"),
                ExpressionShape::Direct,
            )
            .at_line(15),
        )
        .with_call(
            CallSiteFact::new(
                "com.shop.service.OrderServiceImpl",
                "placeOrder(Cart)",
                Callee::unresolved("handler.invoke(order)"),
                ExpressionShape::Direct,
            )
            .at_line(18),
        );

    let audit = FileFacts::new(AUDIT_FILE)
        .with_class(
            ClassFact::new("com.shop.service.AuditOrderService")
                .with_interface("com.shop.service.OrderService"),
        )
        .with_method(
            MethodFact::new("com.shop.service.AuditOrderService", "placeOrder")
                .with_parameters(&["Cart"]),
        );

    let repository = FileFacts::new(REPOSITORY_FILE)
        .with_class(ClassFact::new("com.shop.repository.OrderRepository").with_annotation("Repository"))
        .with_method(
            MethodFact::new("com.shop.repository.OrderRepository", "save")
                .with_parameters(&["Order"]),
        )
        .with_method(MethodFact::new("com.shop.repository.OrderRepository", "count"))
        .with_call(
            CallSiteFact::new(
                "com.shop.repository.OrderRepository",
                "save(Order)",
                Callee::resolved("com.shop.model.Order", "total"),
                ExpressionShape::Direct,
            )
            .at_line(12),
        );

    let order = FileFacts::new(ORDER_FILE)
        .with_class(ClassFact::new("com.shop.model.Order"))
        .with_method(MethodFact::new("com.shop.model.Order", "total"))
        .with_method(MethodFact::new("com.shop.model.Order", "items"));

    MemoryFactSource::new()
        .with_file(controller)
        .with_file(service)
        .with_file(service_impl)
        .with_file(audit)
        .with_file(repository)
        .with_file(order)
}

/// Two classes calling each other, for cycle detection.
pub fn cyclic_source() -> MemoryFactSource {
    let a = FileFacts::new("src/A.java")
        .with_class(ClassFact::new("com.app.A"))
        .with_method(MethodFact::new("com.app.A", "ping"))
        .with_call(
            CallSiteFact::new(
                "com.app.A",
                "ping()",
                Callee::resolved("com.app.B", "pong"),
                ExpressionShape::Direct,
            )
            .at_line(5),
        );
    let b = FileFacts::new("src/B.java")
        .with_class(ClassFact::new("com.app.B"))
        .with_method(MethodFact::new("com.app.B", "pong"))
        .with_call(
            CallSiteFact::new(
                "com.app.B",
                "pong()",
                Callee::resolved("com.app.A", "ping"),
                ExpressionShape::Direct,
            )
            .at_line(7),
        );
    MemoryFactSource::new().with_file(a).with_file(b)
}

pub fn controller_place_order() -> NodeId {
    NodeId::method("com.shop.web.OrderController", "placeOrder(Cart)")
}

pub fn controller_get_order() -> NodeId {
    NodeId::method("com.shop.web.OrderController", "getOrder(long)")
}

pub fn impl_place_order() -> NodeId {
    NodeId::method("com.shop.service.OrderServiceImpl", "placeOrder(Cart)")
}

pub fn audit_place_order() -> NodeId {
    NodeId::method("com.shop.service.AuditOrderService", "placeOrder(Cart)")
}

pub fn impl_find_order() -> NodeId {
    NodeId::method("com.shop.service.OrderServiceImpl", "findOrder(long)")
}

pub fn repository_save() -> NodeId {
    NodeId::method("com.shop.repository.OrderRepository", "save(Order)")
}

pub fn order_total() -> NodeId {
    NodeId::method("com.shop.model.Order", "total()")
}
