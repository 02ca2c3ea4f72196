// Shared by the unit tests (`src/fixtures.rs`) and the integration tests
// (`tests/common/mod.rs`) through `include!`, the includer brings `SchemaGraph`
// into scope.

/// A slice of the Microsoft Graph v1.0 metadata.
pub fn graph_schema() -> SchemaGraph {
    let schema = SchemaGraph::builder()
        .namespace("microsoft.graph")
        .enum_type("importance")
        .enum_type("bodyType")
        .complex_type("itemBody", |ty| {
            ty.property("contentType", "bodyType")
                .property("content", "Edm.String")
        })
        .complex_type("emailAddress", |ty| {
            ty.property("name", "Edm.String")
                .property("address", "Edm.String")
        })
        .complex_type("recipient", |ty| ty.property("emailAddress", "emailAddress"))
        .complex_type("attendee", |ty| ty.base("recipient").property("type", "Edm.String"))
        .complex_type("dateTimeTimeZone", |ty| {
            ty.property("dateTime", "Edm.String")
                .property("timeZone", "Edm.String")
        })
        .entity_type("entity", |ty| ty.property("id", "Edm.String"))
        .entity_type("directoryObject", |ty| {
            ty.base("entity")
                .navigation("memberOf", "Collection(directoryObject)")
        })
        .entity_type("user", |ty| {
            ty.base("directoryObject")
                .property("displayName", "Edm.String")
                .property("givenName", "Edm.String")
                .property("postalCode", "Edm.String")
                .property("businessPhones", "Collection(Edm.String)")
                .navigation("manager", "directoryObject")
                .navigation("messages", "Collection(message)")
                .navigation("events", "Collection(event)")
                .navigation("people", "Collection(person)")
                .navigation("mailFolders", "Collection(mailFolder)")
                .navigation("drive", "drive")
        })
        .entity_type("group", |ty| {
            ty.base("directoryObject")
                .property("displayName", "Edm.String")
                .navigation("members", "Collection(directoryObject)")
        })
        .entity_type("mailFolder", |ty| {
            ty.base("entity")
                .property("displayName", "Edm.String")
                .navigation("messages", "Collection(message)")
                .navigation("childFolders", "Collection(mailFolder)")
        })
        .entity_type("outlookItem", |ty| {
            ty.base("entity")
                .property("categories", "Collection(Edm.String)")
        })
        .entity_type("message", |ty| {
            ty.base("outlookItem")
                .property("subject", "Edm.String")
                .property("body", "itemBody")
                .property("importance", "importance")
                .property("from", "recipient")
                .property("toRecipients", "Collection(recipient)")
                .property("ccRecipients", "Collection(recipient)")
                .navigation("attachments", "Collection(attachment)")
        })
        .entity_type("attachment", |ty| ty.base("entity").property("name", "Edm.String"))
        .entity_type("fileAttachment", |ty| {
            ty.base("attachment").property("contentBytes", "Edm.Binary")
        })
        .entity_type("event", |ty| {
            ty.base("outlookItem")
                .property("subject", "Edm.String")
                .property("start", "dateTimeTimeZone")
                .property("attendees", "Collection(attendee)")
        })
        .entity_type("person", |ty| ty.base("entity").property("displayName", "Edm.String"))
        .entity_type("drive", |ty| ty.base("entity").navigation("root", "driveItem"))
        .entity_type("driveItem", |ty| {
            ty.base("entity")
                .property("name", "Edm.String")
                .navigation("children", "Collection(driveItem)")
        })
        .entity_set("users", "user")
        .entity_set("groups", "group")
        .singleton("me", "user")
        .action("sendMail", "user", |op| {
            op.parameter("message", "message")
                .parameter("saveToSentItems", "Edm.Boolean")
        })
        .action("reply", "message", |op| {
            op.parameter("message", "message")
                .parameter("comment", "Edm.String")
        })
        .action("forward", "message", |op| {
            op.parameter("comment", "Edm.String")
                .parameter("toRecipients", "Collection(recipient)")
        })
        .action("checkMemberGroups", "directoryObject", |op| {
            op.parameter("groupIds", "Collection(Edm.String)")
                .returns("Collection(Edm.String)")
        })
        .function("getMemberGroups", "directoryObject", |op| {
            op.parameter("securityEnabledOnly", "Edm.Boolean")
                .returns("Collection(Edm.String)")
        })
        .function("delta", "Collection(user)", |op| op.returns("Collection(user)"))
        .function("delta", "Collection(message)", |op| op.returns("Collection(message)"))
        .build();

    match schema {
        Ok(schema) => schema,
        Err(error) => panic!("invalid test schema: {error}"),
    }
}
